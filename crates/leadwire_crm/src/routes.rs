use axum::{routing::post, Router};
use leadwire_config::AppConfig;
use leadwire_credentials::CredentialStore;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{sync_crm_handler, CrmState};

/// Creates a router containing the CRM sync routes.
pub fn routes(config: Arc<AppConfig>, store: Arc<dyn CredentialStore>) -> Router {
    info!("CRM routes initialized");

    let state = Arc::new(CrmState { config, store });

    Router::new()
        .route("/sync-crm", post(sync_crm_handler))
        .with_state(state)
}
