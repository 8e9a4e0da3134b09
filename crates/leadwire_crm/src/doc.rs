#![allow(dead_code)]
use utoipa::OpenApi;

use crate::handlers::{CrmSyncRequest, SyncCrmResponse};
use crate::logic::CrmSyncOutcome;
use leadwire_common::error::ErrorResponse;

#[utoipa::path(
    post,
    path = "/sync-crm",
    request_body(content = CrmSyncRequest, example = json!({
        "userId": "user-123",
        "callRecord": {
            "summary": "Follow-up call, lead interested",
            "durationSecs": 180
        },
        "crmType": "hubspot"
    })),
    responses(
        (status = 200, description = "Call record synced", body = SyncCrmResponse,
         example = json!({
             "message": "Call record synced to hubspot.",
             "response": { "status": "success", "service": "HubSpot", "recordId": "12345" }
         })
        ),
        (status = 400, description = "Bad Request", body = ErrorResponse,
         example = json!({ "error": "Unsupported CRM type." })
        ),
        (status = 404, description = "Credentials not found", body = ErrorResponse,
         example = json!({ "error": "CRM credentials not found for hubspot." })
        ),
        (status = 500, description = "Internal Server Error", body = ErrorResponse,
         example = json!({ "error": "Failed to sync to hubspot. Error: connection reset" })
        )
    ),
    tag = "CRM"
)]
fn doc_sync_crm_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_sync_crm_handler),
    components(schemas(CrmSyncRequest, SyncCrmResponse, CrmSyncOutcome, ErrorResponse)),
    tags((name = "CRM", description = "Call record forwarding to CRM backends"))
)]
pub struct CrmApiDoc;
