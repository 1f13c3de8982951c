// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`DocumentStore`] trait.
//!
//! Usage counters live in `usage_counters` keyed by (class, identity); log
//! entries in `usage_log` keyed by (class, identity, entry id). The counter
//! increment is a single upsert, so concurrent increments never lose
//! updates. Log appends use `INSERT OR IGNORE` for create-only semantics.

use async_trait::async_trait;
use larder_core::{DocumentStore, LarderError, ObjectDoc, TokenUsage, UsageLogEntry, UserClass};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// SQLite-backed document store.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    db: Database,
}

impl SqliteDocumentStore {
    /// Opens the store at `path`, creating the database if needed.
    pub async fn open(path: &str) -> Result<Self, LarderError> {
        Ok(Self {
            db: Database::open(path).await?,
        })
    }

    /// Wraps an already-open database handle.
    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Inserts an object record, as the upload pipeline would.
    pub async fn put_object_record(&self, id: &str, doc: &ObjectDoc) -> Result<(), LarderError> {
        let id = id.to_string();
        let file = doc.file.clone();
        let objects_json = serde_json::to_string(&doc.objects).map_err(|e| {
            LarderError::Storage {
                source: Box::new(e),
            }
        })?;
        self.db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO object_records (id, file, objects_json)
                     VALUES (?1, ?2, ?3)",
                    params![id, file, objects_json],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoints and releases the database.
    pub async fn close(&self) -> Result<(), LarderError> {
        self.db.close().await
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn weekly_usage(
        &self,
        class: UserClass,
        identity: &str,
    ) -> Result<Option<u64>, LarderError> {
        let class = class.to_string();
        let identity = identity.to_string();
        self.db
            .connection()
            .call(move |conn| {
                let result = conn.query_row(
                    "SELECT weekly_usage FROM usage_counters
                     WHERE user_class = ?1 AND identity_id = ?2",
                    params![class, identity],
                    |row| row.get::<_, u64>(0),
                );
                match result {
                    Ok(usage) => Ok(Some(usage)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
            .map_err(map_tr_err)
    }

    async fn increment_weekly_usage(
        &self,
        class: UserClass,
        identity: &str,
    ) -> Result<(), LarderError> {
        let class = class.to_string();
        let identity = identity.to_string();
        self.db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO usage_counters (user_class, identity_id, weekly_usage)
                     VALUES (?1, ?2, 1)
                     ON CONFLICT (user_class, identity_id) DO UPDATE SET
                         weekly_usage = weekly_usage + 1,
                         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                    params![class, identity],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn append_usage_log(
        &self,
        class: UserClass,
        identity: &str,
        entry: &UsageLogEntry,
    ) -> Result<(), LarderError> {
        let class = class.to_string();
        let identity = identity.to_string();
        let entry = entry.clone();
        let usage_json = entry
            .usage
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| LarderError::Storage {
                source: Box::new(e),
            })?;
        let objects_json = entry
            .objects
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| LarderError::Storage {
                source: Box::new(e),
            })?;

        self.db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO usage_log
                         (user_class, identity_id, entry_id, kind, model,
                          finish_reason, usage_json, objects_json,
                          response_time_ms, file_size)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        class,
                        identity,
                        entry.entry_id,
                        entry.kind,
                        entry.model,
                        entry.finish_reason,
                        usage_json,
                        objects_json,
                        entry.response_time_ms,
                        entry.file_size,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn delete_object_record(&self, id: &str) -> Result<(), LarderError> {
        let id = id.to_string();
        self.db
            .connection()
            .call(move |conn| {
                conn.execute("DELETE FROM object_records WHERE id = ?1", params![id])?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Reads a usage log row back into a [`UsageLogEntry`] (test support).
#[cfg(test)]
fn row_to_entry(row: &rusqlite::Row<'_>) -> Result<UsageLogEntry, rusqlite::Error> {
    let usage_json: Option<String> = row.get(4)?;
    let objects_json: Option<String> = row.get(5)?;
    Ok(UsageLogEntry {
        entry_id: row.get(0)?,
        kind: row.get(1)?,
        model: row.get(2)?,
        finish_reason: row.get(3)?,
        usage: usage_json.and_then(|j| serde_json::from_str::<TokenUsage>(&j).ok()),
        objects: objects_json.and_then(|j| serde_json::from_str(&j).ok()),
        response_time_ms: row.get(6)?,
        file_size: row.get(7)?,
    })
}
