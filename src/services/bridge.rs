// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signed forwarding of site events to the n8n automation webhook.

use crate::config::Config;
use crate::error::AppError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Path appended to the n8n base URL.
pub const WEBHOOK_PATH: &str = "/webhook/clean2";

/// Upstream reply passed back to the caller.
#[derive(Debug, Clone)]
pub struct BridgeReply {
    pub status: u16,
    pub success: bool,
    pub body: String,
}

#[derive(Clone)]
pub struct AgentBridge {
    http: reqwest::Client,
    secret: Vec<u8>,
    target_url: String,
}

impl AgentBridge {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret: config.agent_hmac_secret.clone().into_bytes(),
            target_url: format!(
                "{}{}",
                config.n8n_webhook_base.trim_end_matches('/'),
                WEBHOOK_PATH
            ),
        }
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Hex HMAC-SHA256 of `body`.
    pub fn sign(&self, body: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
        mac.update(body.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Sign and forward `body`. An empty body is sent as `{}`.
    pub async fn forward(&self, body: &str) -> Result<BridgeReply, AppError> {
        let body = if body.is_empty() { "{}" } else { body };
        let signature = self.sign(body)?;

        let response = self
            .http
            .post(&self.target_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("X-Agent-HMAC", signature)
            .header("X-Source", "site")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Agent bridge request failed: {}", e)))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::Provider(format!("Agent bridge reply unreadable: {}", e))
        })?;

        tracing::info!(status = %status, "Agent bridge forwarded");

        Ok(BridgeReply {
            status: status.as_u16(),
            success: status.is_success(),
            body: text,
        })
    }
}
