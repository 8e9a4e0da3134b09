use axum::{routing::post, Router};
use leadwire_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{save_credentials_handler, CredentialsState};
use crate::store::CredentialStore;

/// Creates a router containing the credential management routes.
///
/// The store is dependency-injected: the backend constructs it once at
/// startup and passes the same handle to every feature router.
pub fn routes(config: Arc<AppConfig>, store: Arc<dyn CredentialStore>) -> Router {
    info!("Credential routes initialized");

    let state = Arc::new(CredentialsState { config, store });

    Router::new()
        .route("/save-credentials", post(save_credentials_handler))
        .with_state(state)
}
