// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Orchestrator heartbeat worker.
//!
//! Keeps `jarvis:heartbeat` fresh in Redis so other services can tell the
//! worker is alive.

use ark_gateway::{config::DEFAULT_REDIS_URL, logging::init_logging, services::Heartbeat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    // Only REDIS_URL matters here, so skip the full server config.
    let redis_url = std::env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());

    let heartbeat = Heartbeat::new(&redis_url)?;
    tracing::info!("Jarvis orchestrator online");

    heartbeat.run().await;
    Ok(())
}
