// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Brevo transactional email client.
//!
//! Emails are queued with [`BrevoService::queue_email`], which spawns the
//! send onto the runtime and returns immediately. Delivery is attempted
//! once; failures are logged and never reported back to the caller.

use crate::config::Config;
use crate::error::AppError;
use serde::Serialize;
use std::time::Duration;
use tokio::task::JoinHandle;

const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Named email address as Brevo expects it.
#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

/// Request body for `POST /v3/smtp/email`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPayload {
    pub sender: Contact,
    pub to: Vec<Contact>,
    pub subject: String,
    pub html_content: String,
}

#[derive(Clone)]
pub struct BrevoService {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    sender: Contact,
}

impl BrevoService {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.brevo_api_url.clone(),
            api_key: config.brevo_api_key.clone(),
            sender: Contact {
                name: Some(config.sender_name.clone()),
                email: config.sender_email.clone(),
            },
        }
    }

    /// Build the payload for a plain-text body wrapped in a paragraph.
    pub fn build_payload(&self, to: &str, subject: &str, body: &str) -> EmailPayload {
        EmailPayload {
            sender: self.sender.clone(),
            to: vec![Contact {
                name: None,
                email: to.to_string(),
            }],
            subject: subject.to_string(),
            html_content: format!("<p>{}</p>", body),
        }
    }

    /// Send an email and wait for Brevo to accept it.
    pub async fn send(&self, payload: &EmailPayload) -> Result<(), AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("BREVO_API_KEY is not set")))?;

        let response = self
            .http
            .post(&self.api_url)
            .timeout(SEND_TIMEOUT)
            .header("api-key", api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Brevo request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }

    /// Send in the background. The handle is only useful to tests.
    pub fn queue_email(&self, payload: EmailPayload) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            match service.send(&payload).await {
                Ok(()) => tracing::info!(subject = %payload.subject, "Notification email sent"),
                Err(e) => tracing::error!(error = %e, "Failed to send notification email"),
            }
        })
    }
}
