//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Development and debugging against a fixture or a local MongoDB. The workspace's main
//! `vitals-run` binary serves the same router.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitals_core::{repositories, AnalyticsService, CoreConfig};

/// Main entry point for the vitals REST API server
///
/// # Environment Variables
/// - `VITALS_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `VITALS_STORE` and the store variables read by [`CoreConfig::from_env`]
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the store configuration is invalid or the store cannot be opened,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("VITALS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::from_env()?;
    let store = repositories::connect(cfg.store()).await?;
    let app = api_rest::router(AnalyticsService::new(store));

    tracing::info!("-- Starting vitals REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
