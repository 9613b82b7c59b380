// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ark Gateway API Server
//!
//! Links the authorized TikTok account, gates uploads on it, and fronts
//! the status, email and automation collaborators.

use ark_gateway::{
    config::Config,
    db::{FileStore, TokenStore},
    logging::init_logging,
    AppState,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, env = %config.app_env, "Starting Ark Gateway");

    let file_store = FileStore::new(&config.data_dir);
    tracing::info!(root = %file_store.root().display(), "Token store initialized");
    let store = TokenStore::new(Arc::new(file_store));

    let state = Arc::new(AppState::new(config.clone(), store));

    // Build router
    let app = ark_gateway::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
