#![allow(dead_code)]
use utoipa::OpenApi;

use crate::handlers::{SaveCredentialsRequest, SaveCredentialsResponse};
use crate::models::CredentialRecord;
use leadwire_common::error::ErrorResponse;

#[utoipa::path(
    post,
    path = "/save-credentials",
    request_body(content = SaveCredentialsRequest, example = json!({
        "userId": "user-123",
        "service": "twilio",
        "credentials": {
            "accountSid": "ACxxxxxxxx",
            "authToken": "secret",
            "phoneNumber": "+15550100"
        }
    })),
    responses(
        (status = 200, description = "Credentials saved", body = SaveCredentialsResponse,
         example = json!({ "message": "twilio credentials saved successfully." })
        ),
        (status = 400, description = "Bad Request", body = ErrorResponse,
         example = json!({ "error": "Missing required parameter: service" })
        ),
        (status = 405, description = "Method Not Allowed", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse,
         example = json!({ "error": "A server error occurred." })
        )
    ),
    tag = "Credentials"
)]
fn doc_save_credentials_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_save_credentials_handler),
    components(schemas(SaveCredentialsRequest, SaveCredentialsResponse, CredentialRecord, ErrorResponse)),
    tags((name = "Credentials", description = "Per-user integration credential management"))
)]
pub struct CredentialsApiDoc;
