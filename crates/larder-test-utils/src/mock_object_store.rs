// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory object store for deterministic testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use larder_core::{LarderError, ObjectMetadata, ObjectStore};

#[derive(Default)]
struct Inner {
    objects: HashMap<String, ObjectMetadata>,
    deleted_paths: Vec<String>,
    fail_deletes: bool,
}

/// An in-memory [`ObjectStore`] with call recording.
#[derive(Clone, Default)]
pub struct MockObjectStore {
    inner: Arc<Mutex<Inner>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an object at `path` with the given creation time and size.
    pub async fn seed_object(&self, path: &str, created_at: DateTime<Utc>, size: u64) {
        self.inner
            .lock()
            .await
            .objects
            .insert(path.to_string(), ObjectMetadata { created_at, size });
    }

    /// All subsequent deletes return a storage error.
    pub async fn fail_deletes(&self) {
        self.inner.lock().await.fail_deletes = true;
    }

    /// Paths passed to `delete`, in call order.
    pub async fn deleted_paths(&self) -> Vec<String> {
        self.inner.lock().await.deleted_paths.clone()
    }

    /// True while the object is still present.
    pub async fn contains(&self, path: &str) -> bool {
        self.inner.lock().await.objects.contains_key(path)
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn metadata(&self, path: &str) -> Result<ObjectMetadata, LarderError> {
        self.inner
            .lock()
            .await
            .objects
            .get(path)
            .copied()
            .ok_or_else(|| LarderError::Storage {
                source: format!("no object at {path}").into(),
            })
    }

    async fn delete(&self, path: &str) -> Result<(), LarderError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_deletes {
            return Err(LarderError::Storage {
                source: "injected delete failure".into(),
            });
        }
        inner.objects.remove(path);
        inner.deleted_paths.push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn metadata_round_trips() {
        let store = MockObjectStore::new();
        let created = Utc::now();
        store.seed_object("images/u_r.jpg", created, 2048).await;

        let meta = store.metadata("images/u_r.jpg").await.unwrap();
        assert_eq!(meta.created_at, created);
        assert_eq!(meta.size, 2048);
    }

    #[tokio::test]
    async fn missing_object_is_an_error() {
        let store = MockObjectStore::new();
        assert!(store.metadata("nope").await.is_err());
    }

    #[tokio::test]
    async fn delete_removes_and_records() {
        let store = MockObjectStore::new();
        store.seed_object("images/a.jpg", Utc::now(), 1).await;
        store.delete("images/a.jpg").await.unwrap();
        assert!(!store.contains("images/a.jpg").await);
        assert_eq!(store.deleted_paths().await, vec!["images/a.jpg".to_string()]);
    }
}
