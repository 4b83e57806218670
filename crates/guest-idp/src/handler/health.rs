//! Liveness and readiness probes

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tokio::time::timeout;

use super::AppState;

/// Handler for `GET /`
pub async fn liveness() -> &'static str {
    "OK"
}

/// Handler for `GET /readiness`
///
/// Ready only if Hydra answers its own liveness probe within the configured
/// timeout. No retries.
pub async fn readiness(State(state): State<Arc<AppState>>) -> Response {
    match timeout(state.readiness_timeout, state.resolver.admin().get_status()).await {
        Ok(Ok(status)) => format!("OIDC {}\nOK", status).into_response(),
        Ok(Err(e)) => {
            tracing::error!("Error getting Hydra status: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "ERROR").into_response()
        }
        Err(_) => {
            tracing::error!(
                "Hydra status probe timed out after {:?}",
                state.readiness_timeout
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "ERROR").into_response()
        }
    }
}
