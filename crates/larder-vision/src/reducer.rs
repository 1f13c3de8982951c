// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reducer for completed vision classifications.
//!
//! A vision run leaves behind an uploaded image and a transient object
//! record carrying the detected labels. The reducer folds that state into
//! the owner's usage log and then removes both artifacts. Every step is
//! best-effort: a failure is logged and the remaining steps still run, so a
//! partial failure never strands more state than necessary.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use larder_core::{DocumentStore, ObjectDoc, ObjectStore, UsageLogEntry, UserClass};
use serde::Deserialize;
use tracing::{debug, warn};

/// Model label recorded for vision classifications.
pub const VISION_MODEL_LABEL: &str = "Google Cloud Vision";

/// Delivery of a newly created object record.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectCreatedEvent {
    /// Id of the record at `objects/{id}`.
    pub id: String,
    /// The record contents; absent when the record vanished between the
    /// trigger and the delivery.
    pub doc: Option<ObjectDoc>,
    /// Time the event fired.
    pub time: DateTime<Utc>,
}

/// Reduces object-detection records into usage log entries and cleans up.
pub struct VisionLogReducer {
    documents: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
    base_location: String,
}

impl VisionLogReducer {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
        base_location: String,
    ) -> Self {
        Self {
            documents,
            objects,
            base_location,
        }
    }

    /// Processes one object-created event.
    ///
    /// Never returns an error: the event has no caller waiting on it, so
    /// every failure is logged and the rest of the pipeline continues.
    pub async fn handle_object_created(&self, event: &ObjectCreatedEvent) {
        let Some(doc) = &event.doc else {
            debug!(id = %event.id, "object record has no contents, nothing to do");
            return;
        };

        let Some((identity_id, request_id)) = parse_image_path(&doc.file, &self.base_location)
        else {
            warn!(id = %event.id, file = %doc.file, "unparseable image path, leaving record in place");
            return;
        };

        // Accounting first. The image metadata supplies the upload time and
        // size; without it the run still gets cleaned up, just not logged.
        match self.objects.metadata(&doc.file).await {
            Ok(meta) => {
                let latency_ms = (event.time - meta.created_at).num_milliseconds().max(0);
                let entry = UsageLogEntry {
                    entry_id: request_id.to_string(),
                    kind: "object".to_string(),
                    model: VISION_MODEL_LABEL.to_string(),
                    finish_reason: None,
                    usage: None,
                    objects: Some(doc.objects.clone()),
                    response_time_ms: latency_ms,
                    file_size: Some(meta.size),
                };

                if let Err(e) = self
                    .documents
                    .increment_weekly_usage(UserClass::User, identity_id)
                    .await
                {
                    warn!(error = %e, identity = %identity_id, "failed to increment weekly usage");
                }
                if let Err(e) = self
                    .documents
                    .append_usage_log(UserClass::User, identity_id, &entry)
                    .await
                {
                    warn!(error = %e, identity = %identity_id, "failed to append vision log entry");
                }
            }
            Err(e) => {
                warn!(error = %e, file = %doc.file, "failed to read image metadata, skipping accounting");
            }
        }

        // Cleanup runs regardless of the accounting outcome.
        if let Err(e) = self.objects.delete(&doc.file).await {
            warn!(error = %e, file = %doc.file, "failed to delete image");
        }
        if let Err(e) = self.documents.delete_object_record(&event.id).await {
            warn!(error = %e, id = %event.id, "failed to delete object record");
        }
    }
}

/// Extracts `(identity_id, request_id)` from a stored image path.
///
/// The path embeds `<identity>_<request>.<ext>` after the base-location
/// marker; anything before the marker (bucket prefixes, leading slashes) is
/// ignored. Returns `None` when the marker is missing or the stem does not
/// split into exactly two non-empty parts.
pub fn parse_image_path<'a>(path: &'a str, base_location: &str) -> Option<(&'a str, &'a str)> {
    let start = path.find(base_location)? + base_location.len();
    let stem = path[start..].split('.').next()?;

    let mut parts = stem.split('_');
    let identity = parts.next().filter(|s| !s.is_empty())?;
    let request = parts.next().filter(|s| !s.is_empty())?;
    if parts.next().is_some() {
        return None;
    }
    Some((identity, request))
}
