// --- File: crates/leadwire_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Tenant identifier used when the firestore section does not override it.
/// Every credential document lives under this scope.
pub const DEFAULT_TENANT_ID: &str = "leadwire";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Firestore Config ---
// Holds non-secret Firestore settings. The service account key itself stays
// on disk at `key_path` and is read by the credential store at call time.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FirestoreConfig {
    pub project_id: Option<String>, // Loaded via LEADWIRE_FIRESTORE__PROJECT_ID
    pub key_path: Option<String>,   // Path to the service account JSON key
    /// Fixed deployment tenant scoping all credential documents.
    #[serde(default = "default_tenant_id")]
    pub tenant_id: String,
}

fn default_tenant_id() -> String {
    DEFAULT_TENANT_ID.to_string()
}

// --- Twilio Config ---
// Per-user Twilio credentials come from the credential store, never from here.
// This section only carries deployment-level knobs for the Twilio REST API.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TwilioConfig {
    /// Override for the Twilio API base URL (regional endpoints, tests).
    pub api_base: Option<String>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_twilio: bool,
    #[serde(default)]
    pub use_crm: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub firestore: Option<FirestoreConfig>,
    #[serde(default)]
    pub twilio: Option<TwilioConfig>,
}

impl AppConfig {
    /// The tenant identifier scoping all credential documents.
    pub fn tenant_id(&self) -> &str {
        self.firestore
            .as_ref()
            .map(|fs| fs.tenant_id.as_str())
            .unwrap_or(DEFAULT_TENANT_ID)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            use_twilio: false,
            use_crm: false,
            firestore: None,
            twilio: None,
        }
    }
}
