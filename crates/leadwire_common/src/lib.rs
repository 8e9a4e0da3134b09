// --- File: crates/leadwire_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error envelope and status mapping
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions
pub mod validate; // Request validation

// Re-export error types and utilities for easier access
pub use error::{error_response, ErrorResponse, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, HTTP_CLIENT},
    method_not_allowed,
};

// Re-export validation utilities for easier access
pub use validate::{json_body, require_fields, typed_request, RequestError};

// Re-export the boxed future alias used by the service traits
pub use services::BoxFuture;
