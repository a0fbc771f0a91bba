//! advisor-server
//!
//! Axum server answering financial questions with a DO / DON'T verdict.
//! A model gateway is consulted when configured; canned advice covers
//! every failure.

mod config;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use financial_advisor::{AdvicePipeline, NoopHistory, PipelineConfig};

use crate::config::ServerConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Initialize model gateway
    let gateway = advisor_runtime::gateway_from_env();
    let info = gateway.info();

    if !info.configured {
        tracing::warn!("⚠ {} not configured - every answer will use fallback advice", info.name);
    } else if gateway.health_check().await {
        tracing::info!("✓ Connected to {} ({})", info.name, info.model);
    } else {
        tracing::warn!("⚠ {} not reachable - fallback advice until it recovers", info.name);
    }

    let pipeline = AdvicePipeline::new(gateway).with_config(PipelineConfig {
        timeout: config.model_timeout,
        ..Default::default()
    });

    // Build application state
    let state = AppState {
        pipeline: Arc::new(pipeline),
        history: Arc::new(NoopHistory),
    };

    let app = build_router(state, config.cors_origin.as_deref());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 advisor-server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  POST /api/advice          - Ask a financial question");
    tracing::info!("  GET  /api/advice/history  - Past answers");
    tracing::info!("  GET  /api/health          - Health check");
    tracing::info!("  GET  /api/model-status    - Model availability");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
