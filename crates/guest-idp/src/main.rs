//! Guest identity provider for Ory Hydra
//!
//! Hydra redirects logins and consents it cannot resolve itself here. This
//! service accepts them all: logins as a fresh guest subject (or the existing
//! one, for an active session) and consents for exactly what was requested.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guest_idp::{router, AppState, ChallengeResolver, Config, HydraClient, Overrides};

#[derive(Parser, Debug)]
#[command(name = "guest-idp")]
#[command(about = "Guest login/consent provider for Ory Hydra")]
struct Cli {
    /// Path to the YAML config file (optional)
    #[arg(long, default_value = "config.yaml", env = "CONFIG_FILE")]
    config: String,

    /// Host to bind to
    #[arg(long, env = "GUEST_IDP_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "GUEST_IDP_PORT")]
    port: Option<u16>,

    /// Base URL of Hydra's admin API
    #[arg(long, env = "HYDRA_ADMIN_URL")]
    admin_url: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            admin_url: self.admin_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guest_idp=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting guest identity provider");

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(&cli.config)?;
    config.apply_overrides(cli.overrides());
    tracing::info!("--- Config ---\n{}", serde_yaml::to_string(&config)?);

    let hydra = HydraClient::new(&config.admin_url)
        .with_context(|| format!("Failed to create Hydra client for {}", config.admin_url))?;
    let state = Arc::new(AppState::new(ChallengeResolver::new(Arc::new(hydra))));

    let app = router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Guest identity provider shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
