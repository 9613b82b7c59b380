// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod bridge;
pub mod notify;
pub mod status;
pub mod tiktok;

use crate::AppState;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(tiktok::routes())
        .merge(notify::routes())
        .merge(bridge::routes())
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
