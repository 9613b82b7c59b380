// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed access to the persisted TikTok token and user documents.

use super::{documents, DocumentStore, StoreResult};
use crate::models::{TokenRecord, UserRecord};
use std::sync::Arc;

/// Token store over an injected document backend.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn DocumentStore>,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self { backend }
    }

    // ─── Token Operations ────────────────────────────────────────

    /// Overwrite the stored token response.
    pub async fn save_tokens(&self, tokens: &TokenRecord) -> StoreResult<()> {
        self.backend.put(documents::TIKTOK_TOKENS, &tokens.0).await
    }

    /// Get the stored token response, if any.
    pub async fn load_tokens(&self) -> StoreResult<Option<TokenRecord>> {
        Ok(self
            .backend
            .get(documents::TIKTOK_TOKENS)
            .await?
            .map(TokenRecord))
    }

    /// The stored bearer token, if a token record with one exists.
    pub async fn get_access_token(&self) -> StoreResult<Option<String>> {
        Ok(self
            .load_tokens()
            .await?
            .and_then(|t| t.access_token().map(str::to_string)))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Overwrite the stored user profile.
    pub async fn save_user(&self, user: &UserRecord) -> StoreResult<()> {
        self.backend.put(documents::TIKTOK_USER, &user.0).await
    }

    /// Get the stored user profile, if any.
    pub async fn load_user(&self) -> StoreResult<Option<UserRecord>> {
        Ok(self
            .backend
            .get(documents::TIKTOK_USER)
            .await?
            .map(UserRecord))
    }
}
