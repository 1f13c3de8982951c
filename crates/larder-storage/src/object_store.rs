// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem implementation of the [`ObjectStore`] trait.
//!
//! Object paths are resolved relative to a configured root directory, so a
//! stored path like `images/<identity>_<request>.jpg` maps to
//! `<root>/images/<identity>_<request>.jpg`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use larder_core::{LarderError, ObjectMetadata, ObjectStore};
use tracing::debug;

/// Filesystem-backed object store.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

fn storage_err(e: std::io::Error) -> LarderError {
    LarderError::Storage {
        source: Box::new(e),
    }
}

fn creation_time(meta: &std::fs::Metadata, path: &Path) -> Result<DateTime<Utc>, LarderError> {
    // Birth time is not available on every filesystem; mtime is the
    // fallback, which for write-once uploads is the same instant.
    meta.created()
        .or_else(|_| meta.modified())
        .map(DateTime::<Utc>::from)
        .map_err(|e| {
            debug!(path = %path.display(), error = %e, "no usable timestamp");
            storage_err(e)
        })
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn metadata(&self, path: &str) -> Result<ObjectMetadata, LarderError> {
        let full = self.resolve(path);
        let meta = tokio::fs::metadata(&full).await.map_err(storage_err)?;
        Ok(ObjectMetadata {
            created_at: creation_time(&meta, &full)?,
            size: meta.len(),
        })
    }

    async fn delete(&self, path: &str) -> Result<(), LarderError> {
        let full = self.resolve(path);
        tokio::fs::remove_file(&full).await.map_err(storage_err)?;
        debug!(path = %full.display(), "object deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn metadata_reports_size_and_timestamp() {
        let dir = tempdir().unwrap();
        let images = dir.path().join("images");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join("u_r.jpg"), vec![0u8; 1234]).unwrap();

        let store = FsObjectStore::new(dir.path());
        let meta = store.metadata("images/u_r.jpg").await.unwrap();
        assert_eq!(meta.size, 1234);
        assert!(meta.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn missing_object_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());
        let err = store.metadata("images/none.jpg").await.unwrap_err();
        assert_eq!(err.code(), "internal");
    }

    #[tokio::test]
    async fn delete_removes_the_file() {
        let dir = tempdir().unwrap();
        let images = dir.path().join("images");
        std::fs::create_dir_all(&images).unwrap();
        let file = images.join("u_r.jpg");
        std::fs::write(&file, b"jpeg").unwrap();

        let store = FsObjectStore::new(dir.path());
        store.delete("images/u_r.jpg").await.unwrap();
        assert!(!file.exists());

        // Deleting again reports the missing file.
        assert!(store.delete("images/u_r.jpg").await.is_err());
    }
}
