// Vendor API - REST surface over the vendor store (Axum)

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::db::{get_all_vendors, insert_vendor};
use crate::schema::{summarize, ValidationError};
use crate::vendor::VendorPayload;
use crate::wire::{
    CreateResponse, ErrorBody, FieldError, HealthResponse, ListResponse, ADD_VENDOR_PATH,
    GET_VENDORS_PATH, HEALTH_PATH,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        AppState {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Store("database lock poisoned".to_string()))
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid vendor: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        let (status, errors) = match self {
            ApiError::BadRequest(_) => {
                warn!("{}", detail);
                (StatusCode::BAD_REQUEST, Vec::new())
            }
            ApiError::Validation(errors) => {
                warn!("{}", detail);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    errors.iter().map(FieldError::from).collect(),
                )
            }
            ApiError::Store(_) => {
                error!("{}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
            }
        };

        let body = Json(ErrorBody {
            message: "error".to_string(),
            detail,
            errors,
        });

        (status, body).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/vendor/addvendor - Create one vendor
async fn add_vendor(
    State(state): State<AppState>,
    payload: Result<Json<VendorPayload>, JsonRejection>,
) -> Result<Json<CreateResponse>, ApiError> {
    let Json(payload) = payload?;
    let new = payload.validate().map_err(ApiError::Validation)?;

    let conn = state.conn()?;
    let vendor = insert_vendor(&conn, &new).map_err(|e| ApiError::Store(format!("{e:#}")))?;

    info!(id = %vendor.id, "vendor added");
    Ok(Json(CreateResponse::success(vendor)))
}

/// GET /api/vendor/getvendors - Every stored vendor, unfiltered
async fn get_vendors(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
    let conn = state.conn()?;
    let vendors = get_all_vendors(&conn).map_err(|e| ApiError::Store(format!("{e:#}")))?;

    Ok(Json(ListResponse { getres: vendors }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health_check))
        .route(ADD_VENDOR_PATH, post(add_vendor))
        .route(GET_VENDORS_PATH, get(get_vendors))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
