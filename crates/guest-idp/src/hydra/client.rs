//! reqwest-backed [`AdminApi`] implementation

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::models::{
    AcceptConsentRequest, AcceptLoginRequest, CompletedRequest, ConsentContext, HealthStatus,
    HydraErrorBody, LoginContext,
};
use super::{AdminApi, AdminError, Result};

const HEALTH_ALIVE: &str = "/health/alive";
const LOGIN_REQUEST: &str = "/oauth2/auth/requests/login";
const LOGIN_ACCEPT: &str = "/oauth2/auth/requests/login/accept";
const CONSENT_REQUEST: &str = "/oauth2/auth/requests/consent";
const CONSENT_ACCEPT: &str = "/oauth2/auth/requests/consent/accept";

/// Client for Hydra's admin API.
///
/// Holds nothing but the base URL and a pooled HTTP client, so clones are
/// cheap and concurrent use needs no synchronization.
#[derive(Debug, Clone)]
pub struct HydraClient {
    http: reqwest::Client,
    base_url: String,
}

impl HydraClient {
    pub fn new(admin_url: &str) -> Result<Self> {
        Self::with_http_client(reqwest::Client::new(), admin_url)
    }

    pub fn with_http_client(http: reqwest::Client, admin_url: &str) -> Result<Self> {
        let parsed = Url::parse(admin_url).map_err(|source| AdminError::InvalidBaseUrl {
            url: admin_url.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AdminError::UnsupportedScheme(admin_url.to_string()));
        }

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn accept(&self, request: RequestBuilder) -> Result<String> {
        let completed: CompletedRequest = read_json(request.send().await?).await?;
        match completed.redirect_to {
            Some(redirect) if !redirect.is_empty() => Ok(redirect),
            _ => Err(AdminError::MissingRedirect),
        }
    }
}

/// Decode a successful response, or turn a non-2xx one into `AdminError::Status`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let error: HydraErrorBody = serde_json::from_slice(&body).unwrap_or_default();
        let message = match (error.error, error.error_description) {
            (Some(error), Some(description)) => format!("{}: {}", error, description),
            (Some(error), None) => error,
            (None, Some(description)) => description,
            (None, None) => String::from_utf8_lossy(&body).trim().to_string(),
        };
        return Err(AdminError::Status { status, message });
    }

    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl AdminApi for HydraClient {
    async fn get_status(&self) -> Result<String> {
        let response = self.request(Method::GET, HEALTH_ALIVE).send().await?;
        let health: HealthStatus = read_json(response).await?;
        health.status.ok_or(AdminError::MissingStatus)
    }

    async fn fetch_login_context(&self, challenge: &str) -> Result<LoginContext> {
        let response = self
            .request(Method::GET, LOGIN_REQUEST)
            .query(&[("login_challenge", challenge)])
            .send()
            .await?;
        read_json(response).await
    }

    async fn accept_login(&self, challenge: &str, subject: &str) -> Result<String> {
        let request = self
            .request(Method::PUT, LOGIN_ACCEPT)
            .query(&[("login_challenge", challenge)])
            .json(&AcceptLoginRequest::session_scoped(subject));
        self.accept(request).await
    }

    async fn fetch_consent_context(&self, challenge: &str) -> Result<ConsentContext> {
        let response = self
            .request(Method::GET, CONSENT_REQUEST)
            .query(&[("consent_challenge", challenge)])
            .send()
            .await?;
        read_json(response).await
    }

    async fn accept_consent(
        &self,
        challenge: &str,
        audience: Vec<String>,
        scope: Vec<String>,
    ) -> Result<String> {
        let request = self
            .request(Method::PUT, CONSENT_ACCEPT)
            .query(&[("consent_challenge", challenge)])
            .json(&AcceptConsentRequest::guest(audience, scope));
        self.accept(request).await
    }
}
