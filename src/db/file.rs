// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filesystem-backed document store: one `<key>.json` file per document.

use super::{DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores documents as JSON files under a root directory.
///
/// There is no locking; concurrent writers to the same key race and the
/// last completed write wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let path = self.path_for(key);

        let content = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source: e,
                })
            }
        };

        serde_json::from_slice(&content)
            .map(Some)
            .map_err(|e| StoreError::Serialization {
                key: key.to_string(),
                source: e,
            })
    }

    async fn put(&self, key: &str, value: &Value) -> StoreResult<()> {
        let io_err = |e: std::io::Error| StoreError::Io {
            key: key.to_string(),
            source: e,
        };

        tokio::fs::create_dir_all(&self.root).await.map_err(io_err)?;

        let json = serde_json::to_vec(value).map_err(|e| StoreError::Serialization {
            key: key.to_string(),
            source: e,
        })?;

        tokio::fs::write(self.path_for(key), json)
            .await
            .map_err(io_err)?;

        tracing::debug!(key, root = %self.root.display(), "Document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_document_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_creates_root_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let store = FileStore::new(&root);

        store.put("doc", &json!({"a": 1})).await.unwrap();

        assert!(root.join("doc.json").is_file());
        assert_eq!(store.get("doc").await.unwrap(), Some(json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.put("doc", &json!({"v": 1})).await.unwrap();
        store.put("doc", &json!({"v": 2})).await.unwrap();

        assert_eq!(store.get("doc").await.unwrap(), Some(json!({"v": 2})));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("doc.json"), b"{not json").unwrap();
        let store = FileStore::new(dir.path());

        let err = store.get("doc").await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }));
    }
}
