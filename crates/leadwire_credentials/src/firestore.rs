//! Firestore-backed credential store.
//!
//! Talks to the Firestore REST v1 API directly. Credential documents live at
//! `artifacts/{tenant}/users/{user}/integrations/{service}` with every field
//! encoded as a `stringValue`. A write is a `PATCH` without an `updateMask`,
//! which Firestore treats as a full document replace, exactly the overwrite
//! semantics the save operation promises.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error};

use leadwire_common::http::client::HTTP_CLIENT;
use leadwire_common::services::BoxFuture;
use leadwire_config::FirestoreConfig;

use crate::auth::get_firestore_auth_token;
use crate::models::CredentialRecord;
use crate::store::{CredentialStore, StoreError};

/// Production endpoint of the Firestore REST API.
pub const FIRESTORE_API_BASE: &str = "https://firestore.googleapis.com/v1";

/// Credential store backed by Google Cloud Firestore.
pub struct FirestoreCredentialStore {
    client: Client,
    config: FirestoreConfig,
    api_base: String,
}

impl FirestoreCredentialStore {
    /// Creates a store pointed at the production Firestore endpoint.
    pub fn new(config: FirestoreConfig) -> Self {
        Self::with_api_base(config, FIRESTORE_API_BASE)
    }

    /// Creates a store against a custom endpoint (emulator, tests).
    pub fn with_api_base(config: FirestoreConfig, api_base: impl Into<String>) -> Self {
        FirestoreCredentialStore {
            client: HTTP_CLIENT.clone(),
            config,
            api_base: api_base.into(),
        }
    }

    fn project_id(&self) -> Result<&str, StoreError> {
        self.config.project_id.as_deref().ok_or_else(|| {
            StoreError::Unavailable("Missing project_id in FirestoreConfig".to_string())
        })
    }

    fn document_url(&self, project_id: &str, path: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.api_base, project_id, path
        )
    }
}

/// Relative document path for one credential record.
pub(crate) fn document_path(tenant_id: &str, user_id: &str, service: &str) -> String {
    format!(
        "artifacts/{}/users/{}/integrations/{}",
        tenant_id, user_id, service
    )
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FirestoreDocument {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<String, FirestoreValue>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FirestoreValue {
    #[serde(rename = "stringValue", skip_serializing_if = "Option::is_none")]
    string_value: Option<String>,
    // Any other Firestore value kind lands here and marks the field malformed.
    #[serde(flatten)]
    other: BTreeMap<String, serde_json::Value>,
}

fn record_to_document(record: &CredentialRecord) -> FirestoreDocument {
    FirestoreDocument {
        fields: record
            .fields()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    FirestoreValue {
                        string_value: Some(value.to_string()),
                        other: BTreeMap::new(),
                    },
                )
            })
            .collect(),
    }
}

fn record_from_document(document: FirestoreDocument) -> Result<CredentialRecord, StoreError> {
    let mut record = CredentialRecord::new();
    for (name, value) in document.fields {
        match value.string_value {
            Some(text) => record.insert(name, text),
            None => {
                return Err(StoreError::Malformed(format!(
                    "field {} is not a string value",
                    name
                )))
            }
        }
    }
    Ok(record)
}

impl CredentialStore for FirestoreCredentialStore {
    fn fetch(
        &self,
        tenant_id: &str,
        user_id: &str,
        service: &str,
    ) -> BoxFuture<'_, Option<CredentialRecord>, StoreError> {
        let path = document_path(tenant_id, user_id, service);
        Box::pin(async move {
            let project_id = self.project_id()?;
            let url = self.document_url(project_id, &path);
            let token = get_firestore_auth_token(&self.config)
                .await
                .map_err(|err| StoreError::Auth(err.to_string()))?;

            debug!("Fetching credential document at {}", path);
            let response = self.client.get(&url).bearer_auth(token).send().await?;

            if response.status() == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!("Firestore returned {}: {}", status, body);
                return Err(StoreError::Unavailable(format!(
                    "Firestore returned {}: {}",
                    status, body
                )));
            }

            let document: FirestoreDocument = response.json().await?;
            record_from_document(document).map(Some)
        })
    }

    fn store(
        &self,
        tenant_id: &str,
        user_id: &str,
        service: &str,
        record: CredentialRecord,
    ) -> BoxFuture<'_, (), StoreError> {
        let path = document_path(tenant_id, user_id, service);
        Box::pin(async move {
            let project_id = self.project_id()?;
            let url = self.document_url(project_id, &path);
            let token = get_firestore_auth_token(&self.config)
                .await
                .map_err(|err| StoreError::Auth(err.to_string()))?;

            debug!("Writing credential document at {}", path);
            // PATCH without updateMask replaces the whole document
            let response = self
                .client
                .patch(&url)
                .bearer_auth(token)
                .json(&record_to_document(&record))
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!("Firestore returned {}: {}", status, body);
                return Err(StoreError::Unavailable(format!(
                    "Firestore returned {}: {}",
                    status, body
                )));
            }
            Ok(())
        })
    }
}
