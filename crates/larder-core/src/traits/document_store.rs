// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document store adapter trait.
//!
//! Models exactly the capabilities the core needs from the managed document
//! store: read-by-key, an atomic counter increment, a create-or-append on a
//! sub-path, and deletion of a triggering record. The store is responsible
//! for server-assigned timestamps on appended entries.

use async_trait::async_trait;

use crate::error::LarderError;
use crate::types::{UsageLogEntry, UserClass};

/// Adapter for the per-identity usage documents and the transient object
/// records.
///
/// Logical layout mirrors `{class}s/{identity}` documents holding the weekly
/// usage counter, with a `requests/{entry_id}` sub-path holding one usage log
/// entry per completed operation.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Reads the identity's current weekly usage counter.
    ///
    /// Returns `None` when the identity has no document yet (callers treat
    /// that as zero).
    async fn weekly_usage(
        &self,
        class: UserClass,
        identity: &str,
    ) -> Result<Option<u64>, LarderError>;

    /// Atomically increments the identity's weekly usage counter by one,
    /// creating the document if absent.
    ///
    /// The increment is the store's own atomic primitive: concurrent calls
    /// never lose updates, even though the admission check that precedes it
    /// is a plain read.
    async fn increment_weekly_usage(
        &self,
        class: UserClass,
        identity: &str,
    ) -> Result<(), LarderError>;

    /// Appends a usage log entry under the identity's `requests` sub-path.
    ///
    /// Create-only semantics: a second append with the same entry id is
    /// rejected idempotently (no overwrite, no error).
    async fn append_usage_log(
        &self,
        class: UserClass,
        identity: &str,
        entry: &UsageLogEntry,
    ) -> Result<(), LarderError>;

    /// Deletes the triggering object record at `objects/{id}`.
    ///
    /// Deleting an absent record is a no-op, not an error.
    async fn delete_object_record(&self, id: &str) -> Result<(), LarderError>;
}
