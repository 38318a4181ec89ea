// HTTP client side of the vendor API.
//
// Views depend on the `VendorApi` trait only; the blocking reqwest
// implementation is compiled with the `client` feature.

use thiserror::Error;

use crate::vendor::{Vendor, VendorPayload};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

pub trait VendorApi {
    /// Full-scan list of every stored vendor.
    fn list_vendors(&self) -> Result<Vec<Vendor>, FetchError>;

    /// Create one vendor; returns the stored record.
    fn add_vendor(&self, payload: &VendorPayload) -> Result<Vendor, FetchError>;
}

#[cfg(feature = "client")]
pub use http::HttpVendorApi;

#[cfg(feature = "client")]
mod http {
    use reqwest::blocking::{Client, Response};
    use tracing::{debug, warn};

    use super::{FetchError, VendorApi};
    use crate::vendor::{Vendor, VendorPayload};
    use crate::wire::{CreateResponse, ErrorBody, ListResponse, ADD_VENDOR_PATH, GET_VENDORS_PATH};

    #[derive(Debug, Clone)]
    pub struct HttpVendorApi {
        client: Client,
        base_url: String,
    }

    impl HttpVendorApi {
        pub fn new(base_url: &str) -> Self {
            HttpVendorApi {
                client: Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
            }
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        fn check(response: Response) -> Result<Response, FetchError> {
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let detail = match response.json::<ErrorBody>() {
                Ok(body) => body.detail,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            warn!(status = status.as_u16(), %detail, "vendor API request failed");

            Err(FetchError::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }

    impl VendorApi for HttpVendorApi {
        fn list_vendors(&self) -> Result<Vec<Vendor>, FetchError> {
            let response = self
                .client
                .get(self.url(GET_VENDORS_PATH))
                .send()
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let body: ListResponse = Self::check(response)?
                .json()
                .map_err(|e| FetchError::Decode(e.to_string()))?;

            debug!(count = body.getres.len(), "vendors fetched");
            Ok(body.getres)
        }

        fn add_vendor(&self, payload: &VendorPayload) -> Result<Vendor, FetchError> {
            let response = self
                .client
                .post(self.url(ADD_VENDOR_PATH))
                .json(payload)
                .send()
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let body: CreateResponse = Self::check(response)?
                .json()
                .map_err(|e| FetchError::Decode(e.to_string()))?;

            debug!(id = %body.data.id, "vendor created");
            Ok(body.data)
        }
    }

}
