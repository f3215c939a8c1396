// SPDX-License-Identifier: MIT

//! Leetrack API Server
//!
//! Tracks solved LeetCode problems per user and keeps their per-difficulty
//! totals in step with LeetCode.

use leetrack::{
    config::{Config, StoreKind},
    db::{FirestoreDb, MemoryDb, UserStore},
    services::LeetCodeClient,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Leetrack API");

    let db: Arc<dyn UserStore> = match config.store {
        StoreKind::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreKind::Memory => {
            tracing::warn!("Using in-memory user store; data is lost on restart");
            Arc::new(MemoryDb::new())
        }
    };

    let provider = Arc::new(LeetCodeClient::new(
        config.graphql_url.clone(),
        config.provider_timeout,
    )?);
    tracing::info!(
        url = %config.graphql_url,
        timeout_secs = config.provider_timeout.as_secs(),
        "LeetCode client initialized"
    );

    let state = Arc::new(AppState::new(config.clone(), db, provider));
    let app = leetrack::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("leetrack=debug,info")),
        )
        .with(format)
        .init();
}
