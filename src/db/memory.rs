// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document store for tests and ephemeral runs.

use super::{DocumentStore, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.docs.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.docs
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
