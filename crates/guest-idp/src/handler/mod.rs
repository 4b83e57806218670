//! HTTP surface
//!
//! - `GET /` and `GET /readiness` for health checks
//! - `GET /v0/guest/login` login challenge info
//! - `POST /v0/guest/login` and `POST /v0/guest/consent` to accept challenges

pub mod guest;
pub mod health;
pub mod models;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::resolver::ChallengeResolver;

/// How long `/readiness` waits for Hydra before reporting unhealthy
pub const READINESS_TIMEOUT: Duration = Duration::from_secs(1);

/// Shared application state
pub struct AppState {
    pub resolver: ChallengeResolver,
    pub readiness_timeout: Duration,
}

impl AppState {
    pub fn new(resolver: ChallengeResolver) -> Self {
        Self {
            resolver,
            readiness_timeout: READINESS_TIMEOUT,
        }
    }
}

/// Build the router. Unknown paths answer 404, known paths with the wrong
/// method answer 405.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health::liveness))
        .route("/readiness", get(health::readiness))
        .route(
            "/v0/guest/login",
            get(guest::login_info).post(guest::submit_login),
        )
        .route("/v0/guest/consent", post(guest::submit_consent))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
