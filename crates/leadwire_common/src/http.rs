// --- File: crates/leadwire_common/src/http.rs ---
use axum::response::Response;

use crate::error::{error_response, ErrorResponse};

// Include the client module
pub mod client;

/// Fallback handler for requests that match a route path with the wrong
/// method. Wired into the router with `method_not_allowed_fallback` so even a
/// 405 carries the uniform JSON envelope.
pub async fn method_not_allowed() -> Response {
    error_response(405, ErrorResponse::new("Method Not Allowed"))
}
