//! The credential store abstraction and its in-memory implementation.
//!
//! Handlers depend on [`CredentialStore`] as a trait object so the backing
//! store can be swapped: Firestore in deployments, the in-memory map in tests
//! and local development. Both operations are single round-trips with no
//! retries and no cross-key transactions.

use std::collections::HashMap;
use std::sync::RwLock;

use leadwire_common::error::HttpStatusCode;
use leadwire_common::services::BoxFuture;
use thiserror::Error;

use crate::models::CredentialRecord;

/// Errors surfaced by credential store operations.
///
/// A missing record is NOT an error; `fetch` returns `Ok(None)` for that
/// case so callers can distinguish "never connected" from "store down".
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached or answered with a server error.
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),

    /// Our own service-account authentication against the store failed.
    #[error("Credential store authentication failed: {0}")]
    Auth(String),

    /// A document exists at the key but does not hold a flat string map.
    #[error("Malformed credential document: {0}")]
    Malformed(String),
}

impl HttpStatusCode for StoreError {
    fn status_code(&self) -> u16 {
        match self {
            StoreError::Unavailable(_) => 500,
            StoreError::Auth(_) => 500,
            // A malformed document is the caller's credential problem, kin to
            // an incomplete record, not a server fault.
            StoreError::Malformed(_) => 400,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Point read/write access to credential documents keyed by
/// `(tenant, user, service)`.
pub trait CredentialStore: Send + Sync {
    /// Fetches the record at the composite key. `Ok(None)` means no record
    /// exists there, distinct from the record existing but being malformed.
    fn fetch(
        &self,
        tenant_id: &str,
        user_id: &str,
        service: &str,
    ) -> BoxFuture<'_, Option<CredentialRecord>, StoreError>;

    /// Overwrites the record at the composite key wholesale. Prior fields at
    /// that key are discarded, never merged.
    fn store(
        &self,
        tenant_id: &str,
        user_id: &str,
        service: &str,
        record: CredentialRecord,
    ) -> BoxFuture<'_, (), StoreError>;
}

type StoreKey = (String, String, String);

/// In-process credential store.
///
/// Used by tests and by the backend when no Firestore project is configured.
/// The lock is only held across synchronous map access, never across an await.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    records: RwLock<HashMap<StoreKey, CredentialRecord>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        MemoryCredentialStore::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn fetch(
        &self,
        tenant_id: &str,
        user_id: &str,
        service: &str,
    ) -> BoxFuture<'_, Option<CredentialRecord>, StoreError> {
        let key = (
            tenant_id.to_string(),
            user_id.to_string(),
            service.to_string(),
        );
        Box::pin(async move {
            let records = self
                .records
                .read()
                .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
            Ok(records.get(&key).cloned())
        })
    }

    fn store(
        &self,
        tenant_id: &str,
        user_id: &str,
        service: &str,
        record: CredentialRecord,
    ) -> BoxFuture<'_, (), StoreError> {
        let key = (
            tenant_id.to_string(),
            user_id.to_string(),
            service.to_string(),
        );
        Box::pin(async move {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
            records.insert(key, record);
            Ok(())
        })
    }
}
