// --- File: crates/leadwire_twilio/src/routes.rs ---
use axum::{routing::post, Router};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{make_call_handler, TwilioState};
use crate::logic::TwilioVoiceClient;
use leadwire_config::AppConfig;
use leadwire_credentials::CredentialStore;

/// Creates a router containing all routes for the Twilio feature.
///
/// The Twilio API base can be overridden through the `twilio.api_base` config
/// knob (regional endpoints, tests); per-user credentials always come from
/// the injected store.
pub fn routes(config: Arc<AppConfig>, store: Arc<dyn CredentialStore>) -> Router {
    let client = match config.twilio.as_ref().and_then(|t| t.api_base.clone()) {
        Some(api_base) => TwilioVoiceClient::with_api_base(api_base),
        None => TwilioVoiceClient::new(),
    };

    info!("Twilio routes initialized");

    let state = Arc::new(TwilioState {
        config,
        store,
        client,
    });

    Router::new()
        .route("/make-call", post(make_call_handler))
        .with_state(state)
}
