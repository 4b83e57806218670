//! guest-idp library: login/consent provider for Ory Hydra that signs every
//! visitor in as a guest.
//!
//! Exposed as a library so integration tests can build the router against a
//! mock Hydra.

pub mod config;
pub mod handler;
pub mod hydra;
pub mod resolver;

pub use config::{Config, ConfigError, Overrides};
pub use handler::{router, AppState};
pub use hydra::{AdminApi, AdminError, HydraClient};
pub use resolver::{ChallengeResolver, ResolveError};
