use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use reach_cache::spawn_sweeper;
use reach_server::{build_router, AppState, ServiceConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::parse();

    let started = Instant::now();
    let state = AppState::from_config(&config).context("failed to initialize retrieval system")?;
    let _retrieval_sweeper = spawn_sweeper(state.generator.retriever().cache());
    let _response_sweeper = spawn_sweeper(state.generator.cache());
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "retrieval system initialized"
    );

    let app = build_router(Arc::new(state));
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
