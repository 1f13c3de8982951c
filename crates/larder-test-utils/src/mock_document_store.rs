// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document store for deterministic testing.
//!
//! `MockDocumentStore` implements `DocumentStore` with plain maps behind a
//! mutex, plus call recording so tests can assert exactly which writes a
//! code path performed.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use larder_core::{DocumentStore, LarderError, UsageLogEntry, UserClass};

#[derive(Default)]
struct Inner {
    usage: HashMap<(UserClass, String), u64>,
    logs: HashMap<(UserClass, String), Vec<UsageLogEntry>>,
    deleted_records: Vec<String>,
    object_records: HashMap<String, ()>,
    fail_writes: bool,
}

/// An in-memory [`DocumentStore`] with call recording.
///
/// Writes can be made to fail wholesale via [`fail_writes`], to test
/// fire-and-forget code paths.
///
/// [`fail_writes`]: MockDocumentStore::fail_writes
#[derive(Clone, Default)]
pub struct MockDocumentStore {
    inner: Arc<Mutex<Inner>>,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the weekly usage counter for an identity.
    pub async fn set_usage(&self, class: UserClass, identity: &str, usage: u64) {
        self.inner
            .lock()
            .await
            .usage
            .insert((class, identity.to_string()), usage);
    }

    /// Marks an object record as existing, so `delete_object_record` has
    /// something to remove.
    pub async fn seed_object_record(&self, id: &str) {
        self.inner
            .lock()
            .await
            .object_records
            .insert(id.to_string(), ());
    }

    /// All subsequent writes return a storage error.
    pub async fn fail_writes(&self) {
        self.inner.lock().await.fail_writes = true;
    }

    /// Current usage counter, 0 when absent.
    pub async fn usage(&self, class: UserClass, identity: &str) -> u64 {
        self.inner
            .lock()
            .await
            .usage
            .get(&(class, identity.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Recorded log entries for an identity, in append order.
    pub async fn logs(&self, class: UserClass, identity: &str) -> Vec<UsageLogEntry> {
        self.inner
            .lock()
            .await
            .logs
            .get(&(class, identity.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Object-record ids passed to `delete_object_record`, in call order.
    pub async fn deleted_records(&self) -> Vec<String> {
        self.inner.lock().await.deleted_records.clone()
    }
}

fn write_failure() -> LarderError {
    LarderError::Storage {
        source: "injected write failure".into(),
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn weekly_usage(
        &self,
        class: UserClass,
        identity: &str,
    ) -> Result<Option<u64>, LarderError> {
        Ok(self
            .inner
            .lock()
            .await
            .usage
            .get(&(class, identity.to_string()))
            .copied())
    }

    async fn increment_weekly_usage(
        &self,
        class: UserClass,
        identity: &str,
    ) -> Result<(), LarderError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_writes {
            return Err(write_failure());
        }
        *inner.usage.entry((class, identity.to_string())).or_insert(0) += 1;
        Ok(())
    }

    async fn append_usage_log(
        &self,
        class: UserClass,
        identity: &str,
        entry: &UsageLogEntry,
    ) -> Result<(), LarderError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_writes {
            return Err(write_failure());
        }
        let logs = inner
            .logs
            .entry((class, identity.to_string()))
            .or_default();
        // Create-only: a duplicate entry id is silently ignored.
        if !logs.iter().any(|e| e.entry_id == entry.entry_id) {
            logs.push(entry.clone());
        }
        Ok(())
    }

    async fn delete_object_record(&self, id: &str) -> Result<(), LarderError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_writes {
            return Err(write_failure());
        }
        inner.object_records.remove(id);
        inner.deleted_records.push(id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> UsageLogEntry {
        UsageLogEntry {
            entry_id: id.to_string(),
            kind: "emoji".to_string(),
            model: "test-model".to_string(),
            finish_reason: Some("stop".to_string()),
            usage: None,
            objects: None,
            response_time_ms: 12,
            file_size: None,
        }
    }

    #[tokio::test]
    async fn usage_round_trips() {
        let store = MockDocumentStore::new();
        assert_eq!(
            store.weekly_usage(UserClass::User, "u1").await.unwrap(),
            None
        );

        store.increment_weekly_usage(UserClass::User, "u1").await.unwrap();
        store.increment_weekly_usage(UserClass::User, "u1").await.unwrap();
        assert_eq!(
            store.weekly_usage(UserClass::User, "u1").await.unwrap(),
            Some(2)
        );
    }

    #[tokio::test]
    async fn duplicate_log_entry_is_ignored() {
        let store = MockDocumentStore::new();
        store
            .append_usage_log(UserClass::Guest, "1.2.3.4", &entry("a"))
            .await
            .unwrap();
        store
            .append_usage_log(UserClass::Guest, "1.2.3.4", &entry("a"))
            .await
            .unwrap();
        assert_eq!(store.logs(UserClass::Guest, "1.2.3.4").await.len(), 1);
    }

    #[tokio::test]
    async fn injected_failure_rejects_writes() {
        let store = MockDocumentStore::new();
        store.fail_writes().await;
        assert!(store
            .increment_weekly_usage(UserClass::User, "u1")
            .await
            .is_err());
        assert!(store
            .append_usage_log(UserClass::User, "u1", &entry("a"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn delete_is_recorded_even_when_absent() {
        let store = MockDocumentStore::new();
        store.delete_object_record("missing").await.unwrap();
        assert_eq!(store.deleted_records().await, vec!["missing".to_string()]);
    }
}
