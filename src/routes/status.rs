// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Status echo and health check.

use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

const NOT_SET: &str = "not set";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(status))
        .route("/healthz", get(health_check))
}

/// Which platform credentials this deployment has.
///
/// Two fields differ from earlier deployments of this endpoint: `status`
/// is the plain string `"live"` (previously `"👑 Baby is live"`), and
/// `gumroad_token_present` is `false` when `GUMROAD_TOKEN` is unset or
/// empty (previously `true`, since the unset default was `"not set"`).
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub youtube_client_id: String,
    pub youtube_status: String,
    pub gumroad_token_present: bool,
    pub oanda_account_id: String,
}

async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let config = &state.config;

    Json(StatusResponse {
        status: "live".to_string(),
        youtube_client_id: config
            .youtube_client_id
            .clone()
            .unwrap_or_else(|| NOT_SET.to_string()),
        youtube_status: if config.youtube_api_key.is_some() {
            "ready"
        } else {
            "no api key"
        }
        .to_string(),
        gumroad_token_present: config.gumroad_token.is_some(),
        oanda_account_id: config
            .oanda_account_id
            .clone()
            .unwrap_or_else(|| NOT_SET.to_string()),
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub env: String,
    pub build_id: String,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        env: state.config.app_env.clone(),
        build_id,
    })
}
