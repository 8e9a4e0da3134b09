// --- File: crates/leadwire_twilio/src/logic.rs ---
//! Call initiation against the Twilio REST API.
//!
//! The caller's own Twilio credentials come out of the credential store; this
//! module validates their shape, builds the TwiML voice document and submits
//! the call-creation request. Known Twilio error codes are mapped to stable
//! error conditions, everything else falls through as a generic provider
//! failure that keeps the raw code and message for diagnostics.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use leadwire_common::error::HttpStatusCode;
use leadwire_common::http::client::HTTP_CLIENT;
use leadwire_credentials::CredentialRecord;

/// Service name under which a user's Twilio credentials are stored.
pub const TWILIO_SERVICE: &str = "twilio";

/// Production endpoint of the Twilio REST API.
pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum CallError {
    #[error("Incomplete Twilio credentials. Please reconnect your account in Settings.")]
    IncompleteCredentials { missing: &'static str },
    /// Twilio error code 21211: the destination number is not dialable.
    #[error("Invalid phone number format")]
    InvalidDestination { detail: String },
    /// Twilio error code 21212: the origin number is not a valid Twilio number.
    #[error("Invalid Twilio phone number")]
    InvalidCallerId { detail: String },
    /// Twilio error code 20003: the stored account SID / auth token pair was rejected.
    #[error("Authentication failed - please check your Twilio credentials")]
    AuthenticationFailed { detail: String },
    /// Twilio error code 21606: trial accounts may only call verified numbers.
    #[error("Phone number is not verified for trial account")]
    UnverifiedNumber { detail: String },
    /// Any other Twilio-reported failure.
    #[error("Failed to initiate call")]
    Provider { code: Option<i64>, detail: String },
    #[error("Failed to initiate call")]
    Request(#[from] reqwest::Error),
}

impl CallError {
    /// The provider-assigned error code, when Twilio reported one.
    pub fn provider_code(&self) -> Option<i64> {
        match self {
            CallError::InvalidDestination { .. } => Some(21211),
            CallError::InvalidCallerId { .. } => Some(21212),
            CallError::AuthenticationFailed { .. } => Some(20003),
            CallError::UnverifiedNumber { .. } => Some(21606),
            CallError::Provider { code, .. } => *code,
            CallError::IncompleteCredentials { .. } | CallError::Request(_) => None,
        }
    }

    /// The raw diagnostic message behind the user-facing one.
    pub fn detail(&self) -> Option<String> {
        match self {
            CallError::IncompleteCredentials { missing } => {
                Some(format!("missing credential field: {}", missing))
            }
            CallError::InvalidDestination { detail }
            | CallError::InvalidCallerId { detail }
            | CallError::AuthenticationFailed { detail }
            | CallError::UnverifiedNumber { detail }
            | CallError::Provider { detail, .. } => Some(detail.clone()),
            CallError::Request(err) => Some(err.to_string()),
        }
    }
}

impl HttpStatusCode for CallError {
    fn status_code(&self) -> u16 {
        match self {
            CallError::IncompleteCredentials { .. } => 400,
            CallError::InvalidDestination { .. } => 400,
            CallError::InvalidCallerId { .. } => 400,
            CallError::AuthenticationFailed { .. } => 401,
            CallError::UnverifiedNumber { .. } => 400,
            CallError::Provider { .. } => 500,
            CallError::Request(_) => 500,
        }
    }
}

// --- Data Structures ---
/// A validated call-initiation request.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// The user whose stored Twilio credentials place the call.
    pub user_id: String,

    /// Destination number in E.164 form.
    pub target_phone_number: String,

    /// Text the voice provider speaks to the callee.
    pub script: String,

    /// Optional speech locale, e.g. `en-GB`. Omitted from the voice document
    /// when absent.
    #[serde(default)]
    pub language: Option<String>,

    /// Optional voice selector, e.g. `alice`. Omitted from the voice document
    /// when absent.
    #[serde(default)]
    pub tone: Option<String>,
}

/// The three credential fields a stored Twilio record must carry.
#[derive(Debug, Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_number: String,
}

impl TwilioCredentials {
    /// Validates a fetched credential record against the Twilio shape.
    pub fn from_record(record: &CredentialRecord) -> Result<Self, CallError> {
        let field = |name: &'static str| -> Result<String, CallError> {
            match record.get(name) {
                Some(value) if !value.is_empty() => Ok(value.to_string()),
                _ => Err(CallError::IncompleteCredentials { missing: name }),
            }
        };
        Ok(TwilioCredentials {
            account_sid: field("accountSid")?,
            auth_token: field("authToken")?,
            phone_number: field("phoneNumber")?,
        })
    }
}

/// Provider-assigned identity and state of a freshly created call.
#[derive(Debug, Clone)]
pub struct CallCreated {
    pub sid: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct TwilioCallResource {
    sid: String,
    status: String,
}

#[derive(Debug, Default, Deserialize)]
struct TwilioApiError {
    code: Option<i64>,
    message: Option<String>,
}

// --- Voice document ---

/// Builds the TwiML voice document that speaks `script` to the callee.
///
/// `tone` selects the voice and `language` the speech locale; each attribute
/// is omitted entirely when not supplied rather than defaulted. All
/// interpolated text is XML-escaped.
pub fn build_twiml(script: &str, tone: Option<&str>, language: Option<&str>) -> String {
    let mut say = String::from("<Say");
    if let Some(tone) = tone {
        say.push_str(&format!(" voice=\"{}\"", xml_escape(tone)));
    }
    if let Some(language) = language {
        say.push_str(&format!(" language=\"{}\"", xml_escape(language)));
    }
    say.push('>');
    format!("<Response>{}{}</Say></Response>", say, xml_escape(script))
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// --- Twilio REST client ---

/// Thin client for the Twilio call-creation endpoint.
///
/// Authenticated per request with the caller's own account SID and auth
/// token; the client itself holds no credentials.
#[derive(Debug, Clone)]
pub struct TwilioVoiceClient {
    http: Client,
    api_base: String,
}

impl TwilioVoiceClient {
    /// Creates a client pointed at the production Twilio endpoint.
    pub fn new() -> Self {
        Self::with_api_base(TWILIO_API_BASE)
    }

    /// Creates a client against a custom endpoint (regional, tests).
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        TwilioVoiceClient {
            http: HTTP_CLIENT.clone(),
            api_base: api_base.into(),
        }
    }

    /// Submits a call-creation request: the voice document, the destination
    /// number, and the origin number from the stored credentials.
    pub async fn create_call(
        &self,
        credentials: &TwilioCredentials,
        to: &str,
        twiml: &str,
    ) -> Result<CallCreated, CallError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_base, credentials.account_sid
        );

        let params = [
            ("Twiml", twiml),
            ("To", to),
            ("From", credentials.phone_number.as_str()),
        ];

        info!("Initiating Twilio call to {}", to);
        let response = self
            .http
            .post(&url)
            .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let call: TwilioCallResource = response.json().await?;
            info!("Call initiated successfully with SID: {}", call.sid);
            return Ok(CallCreated {
                sid: call.sid,
                status: call.status,
            });
        }

        let body = response.text().await.unwrap_or_default();
        error!("Twilio returned {}: {}", status, body);
        Err(classify_twilio_error(&body))
    }
}

impl Default for TwilioVoiceClient {
    fn default() -> Self {
        TwilioVoiceClient::new()
    }
}

/// Maps a Twilio error response body onto the stable error taxonomy.
fn classify_twilio_error(body: &str) -> CallError {
    let parsed: TwilioApiError = serde_json::from_str(body).unwrap_or_default();
    let detail = parsed.message.unwrap_or_else(|| body.to_string());
    match parsed.code {
        Some(21211) => CallError::InvalidDestination { detail },
        Some(21212) => CallError::InvalidCallerId { detail },
        Some(20003) => CallError::AuthenticationFailed { detail },
        Some(21606) => CallError::UnverifiedNumber { detail },
        code => CallError::Provider { code, detail },
    }
}
