//! Wire types for the Hydra admin API
//!
//! Only the fields this service reads or writes are modelled. Everything else
//! Hydra sends (client metadata, ACR values, ...) is ignored on decode.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Hydra sends `null` for empty lists and unset strings.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `GET /health/alive`
#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
}

/// Hydra's view of an in-progress login, fetched by login challenge
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginContext {
    #[serde(default, deserialize_with = "null_as_default")]
    pub challenge: String,

    /// Subject of an already-authenticated session, empty if there is none
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,

    /// The original authorization request URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_url: String,

    /// Whether Hydra would skip the login UI for this session
    #[serde(default, deserialize_with = "null_as_default")]
    pub skip: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub oidc_context: OidcContext,
}

/// OIDC hints from the authorization request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OidcContext {
    #[serde(default)]
    pub display: Option<String>,

    #[serde(default)]
    pub login_hint: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ui_locales: Vec<String>,
}

/// Hydra's view of a consent request: what the client asked for
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConsentContext {
    #[serde(
        rename = "requested_access_token_audience",
        default,
        deserialize_with = "null_as_default"
    )]
    pub audience: Vec<String>,

    #[serde(
        rename = "requested_scope",
        default,
        deserialize_with = "null_as_default"
    )]
    pub scope: Vec<String>,
}

/// Body of `PUT /oauth2/auth/requests/login/accept`
#[derive(Debug, Serialize)]
pub struct AcceptLoginRequest<'a> {
    pub subject: &'a str,
    pub remember: bool,
    pub remember_for: i64,
}

impl<'a> AcceptLoginRequest<'a> {
    /// Remember the login for the browser session only.
    ///
    /// For login requests Hydra reads `remember_for: 0` as a session cookie.
    pub fn session_scoped(subject: &'a str) -> Self {
        Self {
            subject,
            remember: true,
            remember_for: 0,
        }
    }
}

/// Body of `PUT /oauth2/auth/requests/consent/accept`
#[derive(Debug, Serialize)]
pub struct AcceptConsentRequest {
    pub grant_access_token_audience: Vec<String>,
    pub grant_scope: Vec<String>,
    pub remember: bool,
    pub remember_for: i64,
    pub session: ConsentSession,
}

impl AcceptConsentRequest {
    /// Grant exactly what was requested, remember it indefinitely and mark
    /// the ID token as guest-issued.
    ///
    /// For consent requests Hydra reads `remember_for: 0` as "forever".
    pub fn guest(audience: Vec<String>, scope: Vec<String>) -> Self {
        Self {
            grant_access_token_audience: audience,
            grant_scope: scope,
            remember: true,
            remember_for: 0,
            session: ConsentSession {
                id_token: guest_marker(),
            },
        }
    }
}

/// Session data Hydra copies into issued tokens
#[derive(Debug, Serialize)]
pub struct ConsentSession {
    pub id_token: Value,
}

/// Claim attached to every guest ID token.
///
/// Hydra rejects plain boolean session values
/// (<https://github.com/ory/hydra/issues/3058>), so downstream consumers look
/// for this nested shape instead. Keep it byte-for-byte stable.
pub fn guest_marker() -> Value {
    serde_json::json!({ "guest": { "1": true } })
}

/// `redirect_to` reply shared by both accept calls
#[derive(Debug, Deserialize)]
pub struct CompletedRequest {
    #[serde(default)]
    pub redirect_to: Option<String>,
}

/// Error body Hydra attaches to non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub struct HydraErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}
