//! Guest login and consent endpoints
//!
//! Extractor rejections are taken as `Result` so that malformed bodies and
//! queries render through [`ApiError`] like every other failure here.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use super::models::{ApiError, ChallengeRequest, LoginInfoResponse, LoginQuery, RedirectResponse};
use super::AppState;

/// Handler for `GET /v0/guest/login`
pub async fn login_info(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LoginQuery>, QueryRejection>,
) -> Result<Json<LoginInfoResponse>, ApiError> {
    let Query(query) = query?;
    let context = state.resolver.login_info(query.challenge.as_deref()).await?;
    Ok(Json(context.into()))
}

/// Handler for `POST /v0/guest/login`
///
/// Normally this is where a user would authenticate. Guests are always
/// accepted.
pub async fn submit_login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChallengeRequest>, JsonRejection>,
) -> Result<Json<RedirectResponse>, ApiError> {
    let Json(request) = body?;
    let redirect = state
        .resolver
        .resolve_login(request.challenge.as_deref())
        .await?;
    Ok(Json(RedirectResponse { redirect }))
}

/// Handler for `POST /v0/guest/consent`
pub async fn submit_consent(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChallengeRequest>, JsonRejection>,
) -> Result<Json<RedirectResponse>, ApiError> {
    let Json(request) = body?;
    let redirect = state
        .resolver
        .resolve_consent(request.challenge.as_deref())
        .await?;
    Ok(Json(RedirectResponse { redirect }))
}
