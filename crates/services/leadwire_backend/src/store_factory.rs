// --- File: crates/services/leadwire_backend/src/store_factory.rs ---
//! Credential store construction.
//!
//! The store is the one shared external resource; it is built exactly once at
//! startup and handed to every feature router as an `Arc<dyn CredentialStore>`.

use std::sync::Arc;
use tracing::{info, warn};

use leadwire_config::AppConfig;
use leadwire_credentials::{CredentialStore, FirestoreCredentialStore, MemoryCredentialStore};

/// Picks the store backend from the configuration.
///
/// A configured Firestore project selects the Firestore-backed store;
/// otherwise the backend falls back to the in-memory store, which is only
/// suitable for local development since it forgets everything on restart.
pub fn create_credential_store(config: &Arc<AppConfig>) -> Arc<dyn CredentialStore> {
    match config
        .firestore
        .as_ref()
        .filter(|fs| fs.project_id.is_some())
    {
        Some(fs) => {
            info!(
                "Initializing Firestore credential store for project: {}",
                fs.project_id.as_deref().unwrap_or_default()
            );
            Arc::new(FirestoreCredentialStore::new(fs.clone()))
        }
        None => {
            warn!("No Firestore project configured, using the in-memory credential store");
            Arc::new(MemoryCredentialStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadwire_config::FirestoreConfig;

    #[test]
    fn defaults_to_the_memory_store() {
        let config = Arc::new(AppConfig::default());
        // Just exercising the fallback arm; the handle itself is opaque.
        let _store = create_credential_store(&config);
    }

    #[test]
    fn firestore_section_without_project_still_falls_back() {
        let config = Arc::new(AppConfig {
            firestore: Some(FirestoreConfig {
                project_id: None,
                key_path: Some("secrets/sa.json".to_string()),
                tenant_id: "leadwire".to_string(),
            }),
            ..AppConfig::default()
        });
        let _store = create_credential_store(&config);
    }
}
