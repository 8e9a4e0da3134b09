// --- File: crates/leadwire_crm/src/provider.rs ---
//! The supported CRM backends and the dispatch table over them.
//!
//! Every backend implements the same capability pair (validate the stored
//! credential shape, then execute the provider-specific sync), so the handler
//! never branches on provider names itself.

use serde_json::Value;
use tracing::debug;

use leadwire_common::services::BoxFuture;
use leadwire_credentials::CredentialRecord;

use crate::logic::{CrmError, CrmSyncOutcome};

/// The closed set of CRM backends a call record can be forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrmType {
    Hubspot,
    Zoho,
    Bitrix,
}

impl CrmType {
    /// Parses the wire-level `crmType` tag. The tag doubles as the service
    /// name the user's credentials are stored under.
    pub fn parse(tag: &str) -> Option<CrmType> {
        match tag {
            "hubspot" => Some(CrmType::Hubspot),
            "zoho" => Some(CrmType::Zoho),
            "bitrix" => Some(CrmType::Bitrix),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrmType::Hubspot => "hubspot",
            CrmType::Zoho => "zoho",
            CrmType::Bitrix => "bitrix",
        }
    }
}

/// One CRM backend: a credential shape and a sync call.
pub trait CrmProvider: Send + Sync {
    /// Display name used in sync outcomes and error messages.
    fn name(&self) -> &'static str;

    /// Checks the stored record for the fields this backend needs.
    fn validate_credentials(&self, record: &CredentialRecord) -> Result<(), CrmError>;

    /// Forwards the call record to the backend.
    fn sync(
        &self,
        record: &CredentialRecord,
        call_record: &Value,
    ) -> BoxFuture<'_, CrmSyncOutcome, CrmError>;
}

/// Dispatch table from provider tag to branch implementation.
pub fn provider_for(crm_type: CrmType) -> &'static dyn CrmProvider {
    match crm_type {
        CrmType::Hubspot => &Hubspot,
        CrmType::Zoho => &Zoho,
        CrmType::Bitrix => &Bitrix24,
    }
}

fn require_field(
    record: &CredentialRecord,
    service: &'static str,
    field: &'static str,
) -> Result<(), CrmError> {
    match record.get(field) {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(CrmError::IncompleteCredentials {
            service,
            missing: field,
        }),
    }
}

/// HubSpot: API-key authenticated.
pub struct Hubspot;

impl CrmProvider for Hubspot {
    fn name(&self) -> &'static str {
        "HubSpot"
    }

    fn validate_credentials(&self, record: &CredentialRecord) -> Result<(), CrmError> {
        require_field(record, "HubSpot", "apiKey")
    }

    fn sync(
        &self,
        record: &CredentialRecord,
        call_record: &Value,
    ) -> BoxFuture<'_, CrmSyncOutcome, CrmError> {
        let _api_key = record.get("apiKey").unwrap_or_default().to_string();
        let summary = call_record.to_string();
        Box::pin(async move {
            debug!("Forwarding call record to HubSpot: {}", summary);
            // TODO: post an engagement to /crm/v3/objects/calls once the
            // HubSpot private app is provisioned
            Ok(CrmSyncOutcome {
                status: "success".to_string(),
                service: self.name().to_string(),
                record_id: "12345".to_string(),
            })
        })
    }
}

/// Zoho: API-key authenticated.
pub struct Zoho;

impl CrmProvider for Zoho {
    fn name(&self) -> &'static str {
        "Zoho"
    }

    fn validate_credentials(&self, record: &CredentialRecord) -> Result<(), CrmError> {
        require_field(record, "Zoho", "apiKey")
    }

    fn sync(
        &self,
        record: &CredentialRecord,
        call_record: &Value,
    ) -> BoxFuture<'_, CrmSyncOutcome, CrmError> {
        let _api_key = record.get("apiKey").unwrap_or_default().to_string();
        let summary = call_record.to_string();
        Box::pin(async move {
            debug!("Forwarding call record to Zoho: {}", summary);
            // TODO: create a Calls module entry via the Zoho CRM v2 API
            Ok(CrmSyncOutcome {
                status: "success".to_string(),
                service: self.name().to_string(),
                record_id: "67890".to_string(),
            })
        })
    }
}

/// Bitrix24: inbound-webhook authenticated.
pub struct Bitrix24;

impl CrmProvider for Bitrix24 {
    fn name(&self) -> &'static str {
        "Bitrix24"
    }

    fn validate_credentials(&self, record: &CredentialRecord) -> Result<(), CrmError> {
        require_field(record, "Bitrix24", "webhookUrl")
    }

    fn sync(
        &self,
        record: &CredentialRecord,
        call_record: &Value,
    ) -> BoxFuture<'_, CrmSyncOutcome, CrmError> {
        let _webhook_url = record.get("webhookUrl").unwrap_or_default().to_string();
        let summary = call_record.to_string();
        Box::pin(async move {
            debug!("Forwarding call record to Bitrix24: {}", summary);
            // TODO: call crm.activity.add on the stored inbound webhook
            Ok(CrmSyncOutcome {
                status: "success".to_string(),
                service: self.name().to_string(),
                record_id: "abcde".to_string(),
            })
        })
    }
}
