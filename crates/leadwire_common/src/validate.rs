// --- File: crates/leadwire_common/src/validate.rs ---
//! Request validation shared by all endpoints.
//!
//! Every handler runs the same three steps before touching any external
//! service: unwrap the JSON body, check the operation's required fields in
//! their declared order, then deserialize into the typed request. All three
//! are pure checks.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::error::{error_response, ErrorResponse, HttpStatusCode};

/// Rejection produced by the request validator.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Invalid JSON in request body")]
    InvalidPayload,
    #[error("Missing required parameter: {0}")]
    MissingField(String),
    #[error("Invalid request payload: {0}")]
    Malformed(String),
}

impl HttpStatusCode for RequestError {
    fn status_code(&self) -> u16 {
        match self {
            RequestError::MethodNotAllowed => 405,
            RequestError::InvalidPayload => 400,
            RequestError::MissingField(_) => 400,
            RequestError::Malformed(_) => 400,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), ErrorResponse::new(self.to_string()))
    }
}

/// Unwraps an extracted JSON body, turning any extraction failure
/// (unparsable body, wrong content type) into [`RequestError::InvalidPayload`].
pub fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, RequestError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(_) => Err(RequestError::InvalidPayload),
    }
}

/// Checks the operation's required fields in their declared order and reports
/// the FIRST one missing.
///
/// A field counts as missing when it is absent, `null`, or an empty string,
/// the truthiness rule clients of this API already rely on.
pub fn require_fields(body: &Value, required: &[&str]) -> Result<(), RequestError> {
    for field in required {
        if !is_present(body.get(*field)) {
            return Err(RequestError::MissingField((*field).to_string()));
        }
    }
    Ok(())
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Deserializes the already-field-checked body into the typed request.
pub fn typed_request<T: DeserializeOwned>(body: Value) -> Result<T, RequestError> {
    serde_json::from_value(body).map_err(|err| RequestError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        user_id: String,
        #[serde(default)]
        language: Option<String>,
    }

    #[test]
    fn reports_first_missing_field_in_declared_order() {
        let body = json!({ "script": "hello" });
        let err = require_fields(&body, &["userId", "targetPhoneNumber", "script"]).unwrap_err();
        assert!(matches!(err, RequestError::MissingField(f) if f == "userId"));

        let body = json!({ "userId": "u1", "script": "hello" });
        let err = require_fields(&body, &["userId", "targetPhoneNumber", "script"]).unwrap_err();
        assert!(matches!(err, RequestError::MissingField(f) if f == "targetPhoneNumber"));
    }

    #[test]
    fn null_and_empty_string_count_as_missing() {
        let body = json!({ "userId": null });
        assert!(require_fields(&body, &["userId"]).is_err());

        let body = json!({ "userId": "" });
        assert!(require_fields(&body, &["userId"]).is_err());

        let body = json!({ "userId": "u1" });
        assert!(require_fields(&body, &["userId"]).is_ok());
    }

    #[test]
    fn objects_and_numbers_count_as_present() {
        let body = json!({ "credentials": {}, "attempt": 0 });
        assert!(require_fields(&body, &["credentials", "attempt"]).is_ok());
    }

    #[test]
    fn typed_request_surfaces_malformed_payloads() {
        let ok: Sample = typed_request(json!({ "userId": "u1" })).unwrap();
        assert_eq!(ok.user_id, "u1");
        assert!(ok.language.is_none());

        let err = typed_request::<Sample>(json!({ "userId": 42 })).unwrap_err();
        assert!(matches!(err, RequestError::Malformed(_)));
    }

    #[test]
    fn missing_field_message_names_the_parameter() {
        let err = RequestError::MissingField("userId".to_string());
        assert_eq!(err.to_string(), "Missing required parameter: userId");
        assert_eq!(err.status_code(), 400);
    }
}
