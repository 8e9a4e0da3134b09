//! Data model for stored integration credentials.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored credential document: provider-specific named string fields.
///
/// Identity is the composite key `(tenant, user, service)` under which the
/// record is stored; the record itself is just the field map. Which fields a
/// record must contain is decided by its consumer (the voice-call or CRM
/// dispatcher), not here: a record with fields missing is stored fine and
/// rejected at first use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct CredentialRecord(BTreeMap<String, String>);

impl CredentialRecord {
    pub fn new() -> Self {
        CredentialRecord(BTreeMap::new())
    }

    /// Builds a record from `(field, value)` pairs.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        CredentialRecord(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the stored fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CredentialRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        CredentialRecord::from_fields(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_through_json() {
        let record = CredentialRecord::from_fields([("apiKey", "k-123"), ("region", "eu")]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"apiKey":"k-123","region":"eu"}"#);

        let back: CredentialRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn non_string_values_are_rejected() {
        let err = serde_json::from_str::<CredentialRecord>(r#"{"apiKey": 42}"#);
        assert!(err.is_err());
    }
}
