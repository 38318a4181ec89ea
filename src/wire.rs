// JSON envelopes shared by the API server and the HTTP client.

use serde::{Deserialize, Serialize};

use crate::schema::ValidationError;
use crate::vendor::Vendor;

pub const ADD_VENDOR_PATH: &str = "/api/vendor/addvendor";
pub const GET_VENDORS_PATH: &str = "/api/vendor/getvendors";
pub const HEALTH_PATH: &str = "/api/health";

/// `GET /api/vendor/getvendors`
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub getres: Vec<Vendor>,
}

/// `POST /api/vendor/addvendor` success body
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    pub message: String,
    pub data: Vendor,
}

impl CreateResponse {
    pub fn success(data: Vendor) -> Self {
        CreateResponse {
            message: "success".to_string(),
            data,
        }
    }
}

/// Body of every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<&ValidationError> for FieldError {
    fn from(e: &ValidationError) -> Self {
        FieldError {
            field: e.field.clone(),
            message: e.message.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
