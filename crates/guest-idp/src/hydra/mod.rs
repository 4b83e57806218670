//! Hydra admin API
//!
//! [`AdminApi`] is the narrow surface the challenge resolver needs from the
//! authorization server. [`HydraClient`] implements it over HTTP.
//!
//! Every call is single-shot. Retrying is the caller's decision.

mod client;
pub mod models;

use async_trait::async_trait;
use thiserror::Error;

pub use client::HydraClient;
pub use models::{ConsentContext, LoginContext, OidcContext};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Invalid admin URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Admin URL must use http or https: {0}")]
    UnsupportedScheme(String),

    #[error("Admin API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Admin API returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Malformed admin API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Admin API health response has no status")]
    MissingStatus,

    #[error("Admin API accept response has no redirect_to")]
    MissingRedirect,
}

pub type Result<T> = std::result::Result<T, AdminError>;

/// Operations against the authorization server's admin interface
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Liveness probe. Hydra answers `"ok"` when healthy.
    async fn get_status(&self) -> Result<String>;

    async fn fetch_login_context(&self, challenge: &str) -> Result<LoginContext>;

    /// Accept a login as `subject`, remembered for the browser session only.
    /// Returns the URL to send the browser to next.
    async fn accept_login(&self, challenge: &str, subject: &str) -> Result<String>;

    async fn fetch_consent_context(&self, challenge: &str) -> Result<ConsentContext>;

    /// Grant exactly `audience` and `scope`, remembered indefinitely, with the
    /// guest marker claim in the ID token session. Returns the redirect URL.
    async fn accept_consent(
        &self,
        challenge: &str,
        audience: Vec<String>,
        scope: Vec<String>,
    ) -> Result<String>;
}
