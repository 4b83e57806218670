//! Guest login and consent policy
//!
//! Each flow is a single fetch-then-accept round trip against Hydra. Nothing
//! is kept between requests: a challenge is "pending" only in Hydra's store.
//!
//! - Login: reuse the subject of an active session, otherwise mint a guest ID.
//! - Consent: grant whatever was requested, unconditionally.

use std::sync::Arc;

use rand::RngCore;
use thiserror::Error;

use crate::hydra::{AdminApi, AdminError, LoginContext};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Missing required challenge parameter")]
    MissingChallenge,

    #[error(transparent)]
    Admin(#[from] AdminError),
}

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Mint a fresh guest subject: a random (v4) UUID drawn from `rng`.
pub fn guest_identity<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

fn require_challenge(challenge: Option<&str>) -> Result<&str> {
    match challenge {
        Some(challenge) if !challenge.is_empty() => Ok(challenge),
        _ => Err(ResolveError::MissingChallenge),
    }
}

/// Resolves login and consent challenges on behalf of guest users
#[derive(Clone)]
pub struct ChallengeResolver {
    admin: Arc<dyn AdminApi>,
}

impl ChallengeResolver {
    pub fn new(admin: Arc<dyn AdminApi>) -> Self {
        Self { admin }
    }

    pub fn admin(&self) -> &dyn AdminApi {
        self.admin.as_ref()
    }

    /// Read-only view of a login challenge, for a UI deciding how to present
    /// the guest flow.
    pub async fn login_info(&self, challenge: Option<&str>) -> Result<LoginContext> {
        let challenge = require_challenge(challenge)?;
        Ok(self.admin.fetch_login_context(challenge).await?)
    }

    /// Accept a login challenge and return the redirect URL.
    pub async fn resolve_login(&self, challenge: Option<&str>) -> Result<String> {
        let challenge = require_challenge(challenge)?;
        let context = self.admin.fetch_login_context(challenge).await?;

        // A subject means an active session is being re-confirmed
        let subject = if context.subject.is_empty() {
            let guest = guest_identity(&mut rand::rng());
            tracing::info!(challenge, subject = %guest, "Issuing new guest identity");
            guest
        } else {
            tracing::info!(challenge, subject = %context.subject, "Reusing existing subject");
            context.subject
        };

        Ok(self.admin.accept_login(challenge, &subject).await?)
    }

    /// Accept a consent challenge, granting exactly the requested audience and
    /// scope, and return the redirect URL.
    pub async fn resolve_consent(&self, challenge: Option<&str>) -> Result<String> {
        let challenge = require_challenge(challenge)?;
        let context = self.admin.fetch_consent_context(challenge).await?;

        tracing::info!(
            challenge,
            audience = ?context.audience,
            scope = ?context.scope,
            "Granting guest consent"
        );

        Ok(self
            .admin
            .accept_consent(challenge, context.audience, context.scope)
            .await?)
    }
}
