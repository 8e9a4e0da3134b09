// --- File: crates/leadwire_common/src/error.rs ---
//! The uniform error envelope shared by every Leadwire endpoint.
//!
//! Each feature crate defines its own `thiserror` enum; handlers translate
//! those into an [`ErrorResponse`] plus an HTTP status. Nothing crosses the
//! HTTP boundary as a raw error string or a panic.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// A trait for converting errors to HTTP status codes.
///
/// Implemented by each feature crate's error enum so the handler layer can map
/// error conditions to statuses without string matching.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

/// JSON body returned for every non-2xx response.
///
/// `details` carries the raw upstream message when one exists and
/// `provider_code` the provider-assigned error code (currently only populated
/// by the call-initiation path).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_code: Option<i64>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            details: None,
            provider_code: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_provider_code(mut self, code: i64) -> Self {
        self.provider_code = Some(code);
        self
    }
}

/// Builds a response from a numeric status and an [`ErrorResponse`] body.
///
/// An out-of-range status falls back to 500 rather than panicking.
pub fn error_response(status: u16, body: ErrorResponse) -> Response {
    let status_code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status_code, Json(body)).into_response()
}
