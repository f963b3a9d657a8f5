//! HTTP server entry point.
//!
//! Loads `.env`, reads configuration, wires the collaborators and serves the
//! router on the configured address.

use std::sync::Arc;

use anyhow::Result;
use sora_config::ServerConfig;
use sora_server::{build_app, init_server_state};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.bind_addr.clone();
    let state = Arc::new(init_server_state(config)?);
    let app = build_app(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
