use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitals_core::{AnalyticsService, CoreConfig, repositories};

/// Wait for Ctrl-C so in-flight requests can finish before exit.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("-- Shutting down vitals analytics");
}

/// Main entry point for the vitals analytics service
///
/// Resolves configuration once, opens the record store once and serves the REST API with
/// OpenAPI/Swagger UI.
///
/// # Environment Variables
/// - `VITALS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `VITALS_STORE`: `mongo` (default) or `memory`
/// - `MONGODB_CONNECTION_STRING`, `DATABASE_NAME`: MongoDB location (required for `mongo`)
/// - `COLLECTION_NAME`, `DOCTORS_COLLECTION`: collection names (defaults: "patients", "doctors")
/// - `VITALS_FIXTURE_PATH`: JSON seed file for the `memory` store
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, store setup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vitals=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("VITALS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::from_env()?;
    let store = repositories::connect(cfg.store()).await?;
    let rest_app = api_rest::router(AnalyticsService::new(store));

    tracing::info!("++ Starting vitals REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, rest_app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
