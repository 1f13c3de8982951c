// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object store adapter trait (fetch-metadata-by-path, delete-by-path).

use async_trait::async_trait;

use crate::error::LarderError;
use crate::types::ObjectMetadata;

/// Adapter for the file/object store holding transient uploaded images.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Fetches creation timestamp and size for the object at `path`.
    async fn metadata(&self, path: &str) -> Result<ObjectMetadata, LarderError>;

    /// Deletes the object at `path`.
    async fn delete(&self, path: &str) -> Result<(), LarderError>;
}
