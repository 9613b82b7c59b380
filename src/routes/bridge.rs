// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Agent bridge route: forwards signed site events to n8n.

use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub fn routes() -> Router<Arc<AppState>> {
    // Called straight from the public site, so any origin is allowed.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-agent-hmac"),
            HeaderName::from_static("x-source"),
        ]);

    Router::new()
        .route("/agent-bridge", post(forward))
        .layer(cors)
}

/// Forward the raw body and pass the upstream reply through.
async fn forward(State(state): State<Arc<AppState>>, body: String) -> Response {
    match state.agent_bridge.forward(&body).await {
        Ok(reply) => {
            let status = if reply.success {
                StatusCode::OK
            } else {
                StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY)
            };
            (status, reply.body).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Agent bridge failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
