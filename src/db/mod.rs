// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document storage layer.
//!
//! Each persisted record is a single JSON document addressed by a fixed key.
//! Writes overwrite (last write wins) and reads of a key that was never
//! written return `None`.

pub mod file;
pub mod memory;
pub mod tokens;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use tokens::TokenStore;

use async_trait::async_trait;
use serde_json::Value;

/// Document keys as constants.
pub mod documents {
    /// Raw TikTok token exchange response
    pub const TIKTOK_TOKENS: &str = "tiktok_tokens";
    /// Raw TikTok user-info response
    pub const TIKTOK_USER: &str = "tiktok_user";
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error on {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A key/document store holding whole JSON values.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document, or `None` if it was never written.
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Overwrite a document.
    async fn put(&self, key: &str, value: &Value) -> StoreResult<()>;
}
