//! Gateway HTTP server bootstrap and router wiring.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::{ConfigSchemaHandler, ConfigSchemaSources, GatewayHandlerChain, CONFIG_SCHEMA_ENDPOINT};

#[derive(Debug, Clone)]
/// Public struct `GatewayHttpServerConfig` used across OpenClaw components.
pub struct GatewayHttpServerConfig {
    pub bind: String,
    pub state_dir: PathBuf,
    pub config_path: PathBuf,
}

/// Builds the handler chain router serving the config schema endpoint.
pub fn build_gateway_http_router(sources: ConfigSchemaSources) -> Router {
    GatewayHandlerChain::new()
        .with_handler(Arc::new(ConfigSchemaHandler::new(sources)))
        .into_router()
}

pub async fn run_gateway_http_server(config: GatewayHttpServerConfig) -> Result<()> {
    let bind_addr = config
        .bind
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid --bind '{}'", config.bind))?;
    let sources = ConfigSchemaSources::for_state_dir(&config.state_dir, config.config_path.clone());

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind gateway http server on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound gateway http server address")?;

    tracing::info!(
        addr = %local_addr,
        state_dir = %config.state_dir.display(),
        config_path = %config.config_path.display(),
        "gateway http server listening"
    );
    println!(
        "gateway http server listening: endpoint={} addr={} state_dir={}",
        CONFIG_SCHEMA_ENDPOINT,
        local_addr,
        config.state_dir.display()
    );

    let app = build_gateway_http_router(sources);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("gateway http server exited unexpectedly")?;

    tracing::info!(addr = %local_addr, "gateway http server stopped");
    Ok(())
}
