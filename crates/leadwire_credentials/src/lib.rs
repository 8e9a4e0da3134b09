//! Per-user integration credential store for Leadwire.
//!
//! This crate owns the credential documents that every other feature reads:
//! a flat field→string record per `(tenant, user, service)` key. It provides
//!
//! - the [`store::CredentialStore`] trait the handlers depend on,
//! - a Firestore REST implementation for deployments,
//! - an in-memory implementation for tests and local development,
//! - the `POST /save-credentials` endpoint.
//!
//! Records are overwritten wholesale on save; their shape is validated by the
//! consuming dispatcher, not at write time.

pub mod auth;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod firestore;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;


// Re-export the routes function to be used by the main backend service
pub use routes::routes;
// Re-export the core types most callers need
pub use firestore::FirestoreCredentialStore;
pub use models::CredentialRecord;
pub use store::{CredentialStore, MemoryCredentialStore, StoreError};

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::CredentialsApiDoc;
}
