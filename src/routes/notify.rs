// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email notification route (Brevo, sent in the background).

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/notify", post(notify))
}

#[derive(Debug, Deserialize, Validate)]
pub struct NotifyRequest {
    #[validate(email)]
    pub to: String,
    #[validate(length(max = 998))]
    pub subject: String,
    pub body: String,
}

#[derive(Serialize)]
pub struct NotifyResponse {
    pub queued: bool,
}

/// Queue an email and return without waiting for delivery.
async fn notify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NotifyRequest>,
) -> Result<Json<NotifyResponse>> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let payload = state
        .brevo_service
        .build_payload(&request.to, &request.subject, &request.body);

    // Fire and forget.
    let _ = state.brevo_service.queue_email(payload);

    tracing::info!(subject = %request.subject, "Notification email queued");

    Ok(Json(NotifyResponse { queued: true }))
}
