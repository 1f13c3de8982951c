// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite and filesystem persistence layer for Larder.
//!
//! [`SqliteDocumentStore`] holds the per-identity usage documents and the
//! transient object records; [`FsObjectStore`] holds the uploaded images.

pub mod database;
pub mod document_store;
pub mod object_store;

pub use database::Database;
pub use document_store::SqliteDocumentStore;
pub use object_store::FsObjectStore;
