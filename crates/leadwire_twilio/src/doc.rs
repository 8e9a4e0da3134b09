#![allow(dead_code)]
use utoipa::OpenApi;

use crate::handlers::MakeCallResponse;
use crate::logic::CallRequest;
use leadwire_common::error::ErrorResponse;

#[utoipa::path(
    post,
    path = "/make-call",
    request_body(content = CallRequest, example = json!({
        "userId": "user-123",
        "targetPhoneNumber": "+15550199",
        "script": "Hello, this is a follow-up about your inquiry.",
        "language": "en-GB",
        "tone": "alice"
    })),
    responses(
        (status = 200, description = "Call initiated", body = MakeCallResponse,
         example = json!({
             "message": "Call initiated successfully to +15550199",
             "callSid": "CA5ef8732a3c49700934481addd5ce1659",
             "status": "queued"
         })
        ),
        (status = 400, description = "Bad Request", body = ErrorResponse,
         example = json!({
             "error": "Invalid phone number format",
             "details": "The 'To' number +1 is not a valid phone number.",
             "providerCode": 21211
         })
        ),
        (status = 401, description = "Unauthorized", body = ErrorResponse,
         example = json!({
             "error": "Authentication failed - please check your Twilio credentials",
             "providerCode": 20003
         })
        ),
        (status = 404, description = "Credentials not found", body = ErrorResponse,
         example = json!({
             "error": "Twilio credentials not found for this user. Please connect your account in Settings."
         })
        ),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    ),
    tag = "Twilio"
)]
fn doc_make_call_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_make_call_handler),
    components(schemas(CallRequest, MakeCallResponse, ErrorResponse)),
    tags((name = "Twilio", description = "Outbound voice calls through per-user Twilio accounts"))
)]
pub struct TwilioApiDoc;
