// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.
//! TikTok credentials are deliberately not validated here: a missing value
//! surfaces as a rejection from the provider at callback time.

use std::env;
use std::path::PathBuf;

/// Production TikTok endpoints.
pub const DEFAULT_TIKTOK_TOKEN_URL: &str = "https://open-api.tiktok.com/oauth/access_token";
pub const DEFAULT_TIKTOK_USER_INFO_URL: &str = "https://open-api.tiktok.com/user/info/";
pub const DEFAULT_TIKTOK_UPLOAD_URL: &str = "https://open-api.tiktokglobalshop.com/video/upload/";

/// Brevo transactional email endpoint.
pub const DEFAULT_BREVO_API_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// Heartbeat worker's Redis; read directly by that binary.
pub const DEFAULT_REDIS_URL: &str = "redis://redis:6379/1";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- TikTok account linking ---
    /// OAuth client key
    pub tiktok_client_id: String,
    /// OAuth client secret
    pub tiktok_client_secret: String,
    /// Redirect URI registered with TikTok (must point at `/callback`)
    pub tiktok_redirect_uri: String,
    /// The only username allowed to link an account and upload
    pub authorized_username: String,
    pub tiktok_token_url: String,
    pub tiktok_user_info_url: String,
    pub tiktok_upload_url: String,
    /// Directory holding the token and user documents
    pub data_dir: PathBuf,

    // --- Server ---
    pub port: u16,
    /// Deployment name reported by `/healthz`
    pub app_env: String,

    // --- Status echo ---
    pub youtube_client_id: Option<String>,
    pub youtube_api_key: Option<String>,
    pub gumroad_token: Option<String>,
    pub oanda_account_id: Option<String>,

    // --- Brevo ---
    /// Only checked when an email is actually sent.
    pub brevo_api_key: Option<String>,
    pub brevo_api_url: String,
    pub sender_name: String,
    pub sender_email: String,

    // --- Agent bridge ---
    pub agent_hmac_secret: String,
    pub n8n_webhook_base: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            tiktok_client_id: env::var("TIKTOK_CLIENT_ID").unwrap_or_default(),
            tiktok_client_secret: env::var("TIKTOK_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            tiktok_redirect_uri: env::var("TIKTOK_REDIRECT_URI").unwrap_or_default(),
            authorized_username: env::var("TIKTOK_AUTHORIZED_USERNAME")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("TIKTOK_AUTHORIZED_USERNAME"))?,
            tiktok_token_url: env::var("TIKTOK_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TIKTOK_TOKEN_URL.to_string()),
            tiktok_user_info_url: env::var("TIKTOK_USER_INFO_URL")
                .unwrap_or_else(|_| DEFAULT_TIKTOK_USER_INFO_URL.to_string()),
            tiktok_upload_url: env::var("TIKTOK_UPLOAD_URL")
                .unwrap_or_else(|_| DEFAULT_TIKTOK_UPLOAD_URL.to_string()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),

            port,
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string()),

            youtube_client_id: non_empty_var("YOUTUBE_CLIENT_ID"),
            youtube_api_key: non_empty_var("YOUTUBE_API_KEY"),
            gumroad_token: non_empty_var("GUMROAD_TOKEN"),
            oanda_account_id: non_empty_var("OANDA_ACCOUNT_ID"),

            brevo_api_key: non_empty_var("BREVO_API_KEY").map(|v| v.trim().to_string()),
            brevo_api_url: env::var("BREVO_API_URL")
                .unwrap_or_else(|_| DEFAULT_BREVO_API_URL.to_string()),
            sender_name: env::var("SENDER_NAME").unwrap_or_else(|_| "Dominion Ark".to_string()),
            sender_email: env::var("SENDER_EMAIL")
                .unwrap_or_else(|_| "noreply@dominionhealing.org".to_string()),

            agent_hmac_secret: env::var("AGENT_HMAC_SECRET").unwrap_or_default(),
            n8n_webhook_base: env::var("N8N_WEBHOOK_BASE").unwrap_or_default(),
        })
    }

    /// Config for tests: every outbound URL points at localhost.
    pub fn test_default() -> Self {
        Self {
            tiktok_client_id: "test_client_key".to_string(),
            tiktok_client_secret: "test_client_secret".to_string(),
            tiktok_redirect_uri: "http://localhost:8080/callback".to_string(),
            authorized_username: "lawrence72".to_string(),
            tiktok_token_url: "http://127.0.0.1:9/oauth/access_token".to_string(),
            tiktok_user_info_url: "http://127.0.0.1:9/user/info/".to_string(),
            tiktok_upload_url: "http://127.0.0.1:9/video/upload/".to_string(),
            data_dir: PathBuf::from("data"),
            port: 8080,
            app_env: "test".to_string(),
            youtube_client_id: None,
            youtube_api_key: None,
            gumroad_token: None,
            oanda_account_id: None,
            brevo_api_key: None,
            brevo_api_url: "http://127.0.0.1:9/v3/smtp/email".to_string(),
            sender_name: "Dominion Ark".to_string(),
            sender_email: "noreply@dominionhealing.org".to_string(),
            agent_hmac_secret: "test_hmac_secret".to_string(),
            n8n_webhook_base: "http://127.0.0.1:9".to_string(),
        }
    }
}

/// Read an env var, treating an empty value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
