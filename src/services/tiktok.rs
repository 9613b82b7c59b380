// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TikTok API client and account-linking gate.
//!
//! Handles:
//! - OAuth code exchange and user-info lookup
//! - Persisting the raw token and user responses
//! - Multipart video upload, locked to a single authorized username

use crate::config::Config;
use crate::db::TokenStore;
use crate::error::AppError;
use crate::models::{TokenRecord, UserRecord};
use axum::body::Bytes;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content type sent for the video part when the caller gave none.
pub const DEFAULT_VIDEO_MIME: &str = "video/mp4";

/// TikTok API client.
#[derive(Clone)]
pub struct TikTokClient {
    http: reqwest::Client,
    client_key: String,
    client_secret: String,
    redirect_uri: String,
    token_url: String,
    user_info_url: String,
    upload_url: String,
}

impl TikTokClient {
    /// Create a client from the TikTok section of the configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_key: config.tiktok_client_id.clone(),
            client_secret: config.tiktok_client_secret.clone(),
            redirect_uri: config.tiktok_redirect_uri.clone(),
            token_url: config.tiktok_token_url.clone(),
            user_info_url: config.tiktok_user_info_url.clone(),
            upload_url: config.tiktok_upload_url.clone(),
        }
    }

    /// Exchange an authorization code for the raw token response.
    pub async fn exchange_code(&self, code: &str) -> Result<Value, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_key", self.client_key.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "TikTok token exchange failed");
            return Err(AppError::Provider(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse token response: {}", e)))
    }

    /// Get the raw user-info response for a bearer token.
    pub async fn get_user_info(&self, access_token: &str) -> Result<Value, AppError> {
        let response = self
            .http
            .get(&self.user_info_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("User info request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse user info: {}", e)))
    }

    /// Upload a video with a caption.
    ///
    /// Never fails: every provider problem is folded into
    /// [`UploadResponse::Failure`] with whatever body came back.
    pub async fn upload_video(
        &self,
        access_token: &str,
        video: VideoUpload,
        caption: &str,
    ) -> UploadResponse {
        let content_type = video
            .content_type
            .unwrap_or_else(|| DEFAULT_VIDEO_MIME.to_string());

        let length = video.data.len() as u64;
        let part = match Part::stream_with_length(video.data, length)
            .file_name(video.filename)
            .mime_str(&content_type)
        {
            Ok(part) => part,
            Err(e) => return UploadResponse::failure(format!("Invalid content type: {}", e), None),
        };

        let form = Form::new()
            .part("video", part)
            .text("caption", caption.to_string());

        let response = match self
            .http
            .post(&self.upload_url)
            .bearer_auth(access_token)
            .multipart(form)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "TikTok upload request failed");
                return UploadResponse::failure(e.to_string(), None);
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return UploadResponse::failure(e.to_string(), None),
        };

        if !status.is_success() {
            tracing::warn!(status = %status, "TikTok upload rejected");
            return UploadResponse::failure(format!("HTTP {}", status), Some(body));
        }

        match serde_json::from_str(&body) {
            Ok(parsed) => UploadResponse::success(parsed),
            Err(e) => UploadResponse::failure(format!("JSON parse error: {}", e), Some(body)),
        }
    }
}

/// A video received from the caller.
#[derive(Debug, Clone)]
pub struct VideoUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Body returned by `/callback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackResponse {
    /// "ok" or "error"
    pub status: String,
    pub message: String,
    pub user: Value,
}

/// Body returned by `/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Success {
        status: String,
        response: Value,
    },
    Failure {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        response: Option<String>,
    },
}

impl UploadResponse {
    fn success(response: Value) -> Self {
        UploadResponse::Success {
            status: "success".to_string(),
            response,
        }
    }

    fn failure(error: impl Into<String>, response: Option<String>) -> Self {
        UploadResponse::Failure {
            error: error.into(),
            response,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TikTokService - account linking gate over the token store
// ─────────────────────────────────────────────────────────────────────────────

/// Links the single authorized TikTok account and gates uploads on it.
#[derive(Clone)]
pub struct TikTokService {
    client: TikTokClient,
    store: TokenStore,
    authorized_username: String,
}

impl TikTokService {
    pub fn new(client: TikTokClient, store: TokenStore, authorized_username: String) -> Self {
        Self {
            client,
            store,
            authorized_username,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    // ─── OAuth Callback Handling ─────────────────────────────────────────────

    /// Exchange the code, fetch the profile, store both, then decide.
    ///
    /// A username mismatch is reported in the body but the stored records
    /// are left as fetched.
    pub async fn handle_oauth_callback(&self, code: &str) -> Result<CallbackResponse, AppError> {
        let tokens = TokenRecord(self.client.exchange_code(code).await?);
        self.store.save_tokens(&tokens).await?;

        let access_token = tokens.access_token().ok_or_else(|| {
            AppError::Provider("Token response did not include an access token".to_string())
        })?;

        let user = UserRecord(self.client.get_user_info(access_token).await?);
        self.store.save_user(&user).await?;

        if !user.is_authorized(&self.authorized_username) {
            tracing::warn!(
                username = user.username().unwrap_or("<none>"),
                "Unauthorized TikTok account linked; stored tokens left in place"
            );
            return Ok(CallbackResponse {
                status: "error".to_string(),
                message: "Unauthorized account".to_string(),
                user: user.0,
            });
        }

        tracing::info!(
            username = %self.authorized_username,
            "TikTok account confirmed, tokens stored"
        );

        Ok(CallbackResponse {
            status: "ok".to_string(),
            message: "Account confirmed".to_string(),
            user: user.0,
        })
    }

    // ─── Upload ──────────────────────────────────────────────────────────────

    /// Upload a video for the linked account.
    ///
    /// Returns `Err` only on storage failure; missing state, a locked
    /// account and provider failures are all structured results.
    pub async fn upload_video(
        &self,
        video: VideoUpload,
        caption: &str,
    ) -> Result<UploadResponse, AppError> {
        let Some(user) = self.store.load_user().await? else {
            return Ok(UploadResponse::failure("No user confirmed", None));
        };

        if !user.is_authorized(&self.authorized_username) {
            tracing::warn!(
                username = user.username().unwrap_or("<none>"),
                "Upload refused for unauthorized account"
            );
            return Ok(UploadResponse::failure(
                format!("Uploads locked to {} only", self.authorized_username),
                None,
            ));
        }

        let Some(access_token) = self.store.get_access_token().await? else {
            return Ok(UploadResponse::failure(
                "No access token. Please authenticate first.",
                None,
            ));
        };

        tracing::info!(
            filename = %video.filename,
            bytes = video.data.len(),
            "Uploading video to TikTok"
        );

        Ok(self
            .client
            .upload_video(&access_token, video, caption)
            .await)
    }
}
