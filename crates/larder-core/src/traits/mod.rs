// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits for the external collaborators of the broker and reducer.

pub mod document_store;
pub mod object_store;

pub use document_store::DocumentStore;
pub use object_store::ObjectStore;
