//! HTTP handler for call initiation.
//!
//! Composition per invocation: validate the request, fetch the caller's
//! Twilio credentials from the store, validate their shape, build the voice
//! document, submit the call. Every failure surfaces as the uniform error
//! envelope; Twilio-side failures additionally carry the raw provider code
//! and message.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

use leadwire_common::error::{error_response, ErrorResponse, HttpStatusCode};
use leadwire_common::validate::{json_body, require_fields, typed_request};
use leadwire_config::AppConfig;
use leadwire_credentials::{CredentialStore, StoreError};

use crate::logic::{
    build_twiml, CallError, CallRequest, TwilioCredentials, TwilioVoiceClient, TWILIO_SERVICE,
};

/// Shared state for the Twilio handlers.
#[derive(Clone)]
pub struct TwilioState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CredentialStore>,
    pub client: TwilioVoiceClient,
}

/// Response body for a successfully initiated call.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MakeCallResponse {
    pub message: String,
    pub call_sid: String,
    pub status: String,
}

#[axum::debug_handler]
pub async fn make_call_handler(
    State(state): State<Arc<TwilioState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match json_body(payload) {
        Ok(body) => body,
        Err(err) => return err.into_response(),
    };
    if let Err(err) = require_fields(&body, &["userId", "targetPhoneNumber", "script"]) {
        return err.into_response();
    }
    let request: CallRequest = match typed_request(body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    info!(
        "Processing call request for user: {}, target: {}",
        request.user_id, request.target_phone_number
    );

    debug!("Fetching Twilio credentials from the store");
    let record = match state
        .store
        .fetch(state.config.tenant_id(), &request.user_id, TWILIO_SERVICE)
        .await
    {
        Ok(Some(record)) => record,
        Ok(None) => {
            error!("Twilio credentials not found for user: {}", request.user_id);
            return error_response(
                404,
                ErrorResponse::new(
                    "Twilio credentials not found for this user. Please connect your account in Settings.",
                ),
            );
        }
        Err(err @ StoreError::Malformed(_)) => {
            error!("Malformed Twilio credentials for user: {}", request.user_id);
            return error_response(
                err.status_code(),
                ErrorResponse::new(
                    "Incomplete Twilio credentials. Please reconnect your account in Settings.",
                )
                .with_details(err.to_string()),
            );
        }
        Err(err) => {
            error!("Failed to fetch Twilio credentials: {:?}", err);
            return error_response(
                err.status_code(),
                ErrorResponse::new("Credential store unavailable.").with_details(err.to_string()),
            );
        }
    };

    let credentials = match TwilioCredentials::from_record(&record) {
        Ok(credentials) => credentials,
        Err(err) => {
            error!("Incomplete Twilio credentials for user: {}", request.user_id);
            return call_error_response(err);
        }
    };

    let twiml = build_twiml(
        &request.script,
        request.tone.as_deref(),
        request.language.as_deref(),
    );
    debug!("TwiML prepared: {}", twiml);

    match state
        .client
        .create_call(&credentials, &request.target_phone_number, &twiml)
        .await
    {
        Ok(call) => Json(MakeCallResponse {
            message: format!(
                "Call initiated successfully to {}",
                request.target_phone_number
            ),
            call_sid: call.sid,
            status: call.status,
        })
        .into_response(),
        Err(err) => {
            error!("Twilio API error: {:?}", err);
            call_error_response(err)
        }
    }
}

fn call_error_response(err: CallError) -> Response {
    let mut body = ErrorResponse::new(err.to_string());
    if let Some(detail) = err.detail() {
        body = body.with_details(detail);
    }
    if let Some(code) = err.provider_code() {
        body = body.with_provider_code(code);
    }
    error_response(err.status_code(), body)
}
