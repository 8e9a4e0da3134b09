// --- File: crates/leadwire_crm/src/logic.rs ---
//! CRM sync orchestration and its error taxonomy.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use leadwire_common::error::HttpStatusCode;
use leadwire_credentials::CredentialRecord;

use crate::provider::{provider_for, CrmType};

#[derive(Error, Debug)]
pub enum CrmError {
    /// The requested crmType is outside the supported set.
    #[error("Unsupported CRM type.")]
    UnsupportedProvider { crm_type: String },
    #[error("Incomplete {service} credentials. Please reconnect your account in Settings.")]
    IncompleteCredentials {
        service: &'static str,
        missing: &'static str,
    },
    #[error("Failed to sync to {crm_type}. Error: {message}")]
    SyncFailure { crm_type: String, message: String },
}

impl HttpStatusCode for CrmError {
    fn status_code(&self) -> u16 {
        match self {
            CrmError::UnsupportedProvider { .. } => 400,
            CrmError::IncompleteCredentials { .. } => 400,
            CrmError::SyncFailure { .. } => 500,
        }
    }
}

/// Normalized result of one provider branch: which CRM accepted the record
/// and the identifier it assigned.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CrmSyncOutcome {
    pub status: String,
    pub service: String,
    pub record_id: String,
}

/// Runs the provider branch for `crm_type`: credential shape check, then the
/// provider-specific remote call. Branch failures carry the crmType so the
/// caller can surface which backend rejected the sync.
pub async fn sync_call_record(
    crm_type: CrmType,
    record: &CredentialRecord,
    call_record: &Value,
) -> Result<CrmSyncOutcome, CrmError> {
    let provider = provider_for(crm_type);
    provider.validate_credentials(record)?;
    provider.sync(record, call_record).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn hubspot_branch_returns_its_placeholder_record() {
        let record = CredentialRecord::from_fields([("apiKey", "k-1")]);
        let outcome = sync_call_record(CrmType::Hubspot, &record, &json!({"note": "called"}))
            .await
            .unwrap();
        assert_eq!(outcome.status, "success");
        assert_eq!(outcome.service, "HubSpot");
        assert_eq!(outcome.record_id, "12345");
    }

    #[tokio::test]
    async fn bitrix_without_webhook_url_is_incomplete() {
        let record = CredentialRecord::from_fields([("apiKey", "k-1")]);
        let err = sync_call_record(CrmType::Bitrix, &record, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CrmError::IncompleteCredentials {
                service: "Bitrix24",
                missing: "webhookUrl"
            }
        ));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn sync_failure_is_a_server_error_naming_the_crm() {
        let err = CrmError::SyncFailure {
            crm_type: "zoho".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_string(),
            "Failed to sync to zoho. Error: connection reset"
        );
    }

    #[test]
    fn outcome_serializes_with_camel_case_record_id() {
        let outcome = CrmSyncOutcome {
            status: "success".to_string(),
            service: "Zoho".to_string(),
            record_id: "67890".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            json!({ "status": "success", "service": "Zoho", "recordId": "67890" })
        );
    }
}
