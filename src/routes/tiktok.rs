// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TikTok account linking and upload routes.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::services::tiktok::{CallbackResponse, UploadResponse, VideoUpload};
use crate::AppState;

/// Largest accepted upload request (videos exceed axum's 2 MB default).
const MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/callback", get(callback)).route(
        "/upload",
        post(upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
}

#[derive(Deserialize)]
pub struct CallbackParams {
    code: String,
    #[serde(default)]
    state: Option<String>,
}

/// OAuth callback - exchange code, store tokens and profile, check identity.
async fn callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<CallbackResponse>> {
    tracing::info!(
        state = params.state.as_deref().unwrap_or(""),
        "Exchanging TikTok authorization code"
    );

    let result = state
        .tiktok_service
        .handle_oauth_callback(&params.code)
        .await?;

    Ok(Json(result))
}

/// Upload a video to the linked account.
///
/// Expects multipart form with:
/// - `video`: the file
/// - `caption`: text
async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut video: Option<VideoUpload> = None;
    let mut caption: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "video" => {
                let filename = field.file_name().unwrap_or("video.mp4").to_string();
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;

                video = Some(VideoUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            "caption" => {
                caption = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let video = video.ok_or_else(|| AppError::BadRequest("video is required".to_string()))?;
    let caption =
        caption.ok_or_else(|| AppError::BadRequest("caption is required".to_string()))?;

    let result = state.tiktok_service.upload_video(video, &caption).await?;

    Ok(Json(result))
}
