// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use ark_gateway::config::Config;
use ark_gateway::db::{MemoryStore, TokenStore};
use ark_gateway::routes::create_router;
use ark_gateway::AppState;
use axum::body::Body;
use axum::http::Response;
use std::sync::Arc;
use wiremock::MockServer;

#[allow(dead_code)]
pub const BOUNDARY: &str = "ark-test-boundary";

/// Check if a Redis server is available via environment variable.
#[allow(dead_code)]
pub fn redis_available() -> bool {
    std::env::var("REDIS_URL").is_ok()
}

/// Skip test with message if Redis is not available.
#[macro_export]
macro_rules! require_redis {
    () => {
        if !crate::common::redis_available() {
            eprintln!("⚠️  Skipping: REDIS_URL not set");
            return;
        }
    };
}

/// Config with every provider URL pointed at `server`.
#[allow(dead_code)]
pub fn mock_config(server: &MockServer) -> Config {
    let base = server.uri();
    Config {
        tiktok_token_url: format!("{}/oauth/access_token", base),
        tiktok_user_info_url: format!("{}/user/info/", base),
        tiktok_upload_url: format!("{}/video/upload/", base),
        brevo_api_url: format!("{}/v3/smtp/email", base),
        brevo_api_key: Some("test-brevo-key".to_string()),
        n8n_webhook_base: format!("{}/", base),
        ..Config::test_default()
    }
}

/// Create a test app over an in-memory token store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> (axum::Router, Arc<AppState>) {
    let store = TokenStore::new(Arc::new(MemoryStore::new()));
    let state = Arc::new(AppState::new(config, store));
    (create_router(state.clone()), state)
}

/// Multipart body with an optional `video` file part and optional `caption`.
#[allow(dead_code)]
pub fn multipart_body(video: Option<(&str, &[u8])>, caption: Option<&str>) -> Vec<u8> {
    multipart_body_with_type(video, caption, Some("video/mp4"))
}

/// Like [`multipart_body`], but the video part's `Content-Type` header is
/// `content_type`, or left out entirely for `None`.
#[allow(dead_code)]
pub fn multipart_body_with_type(
    video: Option<(&str, &[u8])>,
    caption: Option<&str>,
    content_type: Option<&str>,
) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(caption) = caption {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"caption\"\r\n\r\n{caption}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((filename, data)) = video {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"video\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
