//! HTTP handler for saving per-user integration credentials.
//!
//! The save operation is an unconditional overwrite: whatever record sat at
//! `(tenant, user, service)` before is replaced wholesale. The shape of the
//! credentials is NOT validated here; the consumer (voice call or CRM sync)
//! checks for the fields it needs at first use.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

use leadwire_common::error::{error_response, ErrorResponse, HttpStatusCode};
use leadwire_common::validate::{json_body, require_fields, typed_request};
use leadwire_config::AppConfig;

use crate::models::CredentialRecord;
use crate::store::CredentialStore;

/// Shared state for the credential handlers.
#[derive(Clone)]
pub struct CredentialsState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CredentialStore>,
}

/// Request body for the save-credentials endpoint.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SaveCredentialsRequest {
    /// The user the credentials belong to.
    pub user_id: String,

    /// Which integration the credentials unlock, e.g. `twilio` or `hubspot`.
    pub service: String,

    /// Provider-specific field/value pairs, stored as-is.
    pub credentials: CredentialRecord,
}

/// Response body for the save-credentials endpoint.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SaveCredentialsResponse {
    pub message: String,
}

#[axum::debug_handler]
pub async fn save_credentials_handler(
    State(state): State<Arc<CredentialsState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match json_body(payload) {
        Ok(body) => body,
        Err(err) => return err.into_response(),
    };
    if let Err(err) = require_fields(&body, &["userId", "service", "credentials"]) {
        return err.into_response();
    }
    let request: SaveCredentialsRequest = match typed_request(body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    debug!(
        "Saving {} credentials for user: {}",
        request.service, request.user_id
    );

    match state
        .store
        .store(
            state.config.tenant_id(),
            &request.user_id,
            &request.service,
            request.credentials,
        )
        .await
    {
        Ok(()) => {
            info!(
                "Stored {} credentials for user: {}",
                request.service, request.user_id
            );
            Json(SaveCredentialsResponse {
                message: format!("{} credentials saved successfully.", request.service),
            })
            .into_response()
        }
        Err(err) => {
            error!("Error saving credentials: {:?}", err);
            error_response(
                err.status_code(),
                ErrorResponse::new("A server error occurred.").with_details(err.to_string()),
            )
        }
    }
}
