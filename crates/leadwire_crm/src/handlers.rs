//! HTTP handler for CRM sync.
//!
//! Ordering is deliberate and matches the store-first flow: the credential
//! fetch happens BEFORE the crmType membership check. An unknown crmType with
//! no stored record is therefore a 404, and only becomes a 400 when a record
//! exists under that service name.

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
use leadwire_credentials::CredentialStore;

use crate::logic::{sync_call_record, CrmError, CrmSyncOutcome};
use crate::provider::CrmType;

/// Shared state for the CRM handlers.
#[derive(Clone)]
pub struct CrmState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CredentialStore>,
}

/// Request body for the sync-crm endpoint.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CrmSyncRequest {
    /// The user whose stored CRM credentials authorize the sync.
    pub user_id: String,

    /// Opaque call record forwarded to the CRM as-is.
    pub call_record: Value,

    /// Which CRM backend to forward to: `hubspot`, `zoho` or `bitrix`.
    pub crm_type: String,
}

/// Response body for a successful sync.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SyncCrmResponse {
    pub message: String,
    pub response: CrmSyncOutcome,
}

#[axum::debug_handler]
pub async fn sync_crm_handler(
    State(state): State<Arc<CrmState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match json_body(payload) {
        Ok(body) => body,
        Err(err) => return err.into_response(),
    };
    if let Err(err) = require_fields(&body, &["userId", "callRecord", "crmType"]) {
        return err.into_response();
    }
    let request: CrmSyncRequest = match typed_request(body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    info!(
        "Processing CRM sync for user: {}, crmType: {}",
        request.user_id, request.crm_type
    );

    // The crmType tag is also the service name the credentials live under
    debug!("Fetching {} credentials from the store", request.crm_type);
    let record = match state
        .store
        .fetch(state.config.tenant_id(), &request.user_id, &request.crm_type)
        .await
    {
        Ok(Some(record)) => record,
        Ok(None) => {
            error!(
                "CRM credentials not found for user: {}, crmType: {}",
                request.user_id, request.crm_type
            );
            return error_response(
                404,
                ErrorResponse::new(format!(
                    "CRM credentials not found for {}.",
                    request.crm_type
                )),
            );
        }
        Err(err) => {
            error!("Failed to fetch CRM credentials: {:?}", err);
            return error_response(
                err.status_code(),
                ErrorResponse::new("Credential store unavailable.").with_details(err.to_string()),
            );
        }
    };

    let Some(crm_type) = CrmType::parse(&request.crm_type) else {
        let err = CrmError::UnsupportedProvider {
            crm_type: request.crm_type.clone(),
        };
        error!("Unsupported CRM type: {}", request.crm_type);
        return error_response(err.status_code(), ErrorResponse::new(err.to_string()));
    };

    match sync_call_record(crm_type, &record, &request.call_record).await {
        Ok(outcome) => {
            info!(
                "Call record synced to {} as {}",
                outcome.service, outcome.record_id
            );
            Json(SyncCrmResponse {
                message: format!("Call record synced to {}.", request.crm_type),
                response: outcome,
            })
            .into_response()
        }
        Err(err) => {
            error!("Error syncing to {}: {:?}", request.crm_type, err);
            error_response(err.status_code(), ErrorResponse::new(err.to_string()))
        }
    }
}
