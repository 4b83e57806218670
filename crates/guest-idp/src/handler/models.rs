//! Request and response bodies for the guest endpoints

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::hydra::LoginContext;
use crate::resolver::ResolveError;

/// `POST /v0/guest/login` and `POST /v0/guest/consent` body
#[derive(Debug, Deserialize)]
pub struct ChallengeRequest {
    #[serde(default)]
    pub challenge: Option<String>,
}

/// `GET /v0/guest/login` query
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub challenge: Option<String>,
}

/// Where the client should send the browser next
#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub redirect: String,
}

/// Display hints for a login challenge
#[derive(Debug, Serialize)]
pub struct LoginInfoResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(rename = "requestURL")]
    pub request_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(rename = "loginHint", skip_serializing_if = "Option::is_none")]
    pub login_hint: Option<String>,

    #[serde(rename = "uiLocales", skip_serializing_if = "Vec::is_empty")]
    pub ui_locales: Vec<String>,
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

impl From<LoginContext> for LoginInfoResponse {
    fn from(context: LoginContext) -> Self {
        let oidc = context.oidc_context;
        Self {
            subject: non_empty(context.subject),
            request_url: context.request_url,
            display: oidc.display.and_then(non_empty),
            login_hint: oidc.login_hint.and_then(non_empty),
            ui_locales: oidc.ui_locales,
        }
    }
}

/// JSON error body. `error` is always `"invalid"`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

/// Any failure on the guest endpoints: rendered as `400 invalid`
#[derive(Debug)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub const CATEGORY: &'static str = "invalid";

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        Self::invalid(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected request: {}", self.message);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: Self::CATEGORY,
                message: self.message,
            }),
        )
            .into_response()
    }
}
