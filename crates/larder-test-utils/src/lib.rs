// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Larder integration tests.
//!
//! Provides in-memory store fakes with call recording for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockDocumentStore`] - In-memory document store with write recording
//! - [`MockObjectStore`] - In-memory object store with delete recording

pub mod mock_document_store;
pub mod mock_object_store;

pub use mock_document_store::MockDocumentStore;
pub use mock_object_store::MockObjectStore;
