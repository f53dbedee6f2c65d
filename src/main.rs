use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use worldstate::api::{create_router, ApiState};
use worldstate::config::{load_config, WorldConfig};
use worldstate::world::WorldService;

const DEFAULT_CONFIG_PATH: &str = "worldstate.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worldstate=info,tower_http=info".into()),
        )
        .init();

    info!("Worldstate starting...");

    let config = read_config()?.apply_env();

    let world = Arc::new(WorldService::with_reset_policy(
        config.listeners.reset_policy,
    ));
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        address = %addr,
        static_dir = %config.server.static_dir.display(),
        reset_policy = ?world.reset_policy(),
        "Worldstate listening"
    );

    let state = ApiState {
        world,
        body_size_limit: config.api.body_size_limit_bytes,
    };
    let app = create_router(state, &config.server.static_dir);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Worldstate stopped");
    Ok(())
}

/// Config file from WORLDSTATE_CONFIG, or the default path when present
fn read_config() -> Result<WorldConfig> {
    match std::env::var("WORLDSTATE_CONFIG") {
        Ok(path) => load_config(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {path}: {e}")),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)
            .map_err(|e| anyhow::anyhow!("Failed to load config {DEFAULT_CONFIG_PATH}: {e}")),
        Err(_) => {
            info!("No config file, using defaults");
            Ok(WorldConfig::default())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
