// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Larder query broker.
//!
//! This crate provides the error taxonomy, the shared domain types, and the
//! adapter traits for the external collaborators (document store, object
//! store). The broker, reducer, and gateway crates all build on this one.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LarderError;
pub use traits::{DocumentStore, ObjectStore};
pub use types::{
    AiResponse, CallerIdentity, ModelVersion, ObjectDoc, ObjectMetadata, QueryPayload,
    QueryRequest, QueryType, TokenUsage, UsageLogEntry, UserClass,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_traits_are_object_safe() {
        // Both store traits are consumed as `Arc<dyn …>` by the broker and
        // reducer; this won't compile if object safety regresses.
        fn _doc(_: &dyn DocumentStore) {}
        fn _obj(_: &dyn ObjectStore) {}
    }

    #[test]
    fn error_variants_construct() {
        let _ = LarderError::Unauthenticated("User not signed in".into());
        let _ = LarderError::InvalidArgument("missing argument".into());
        let _ = LarderError::ResourceExhausted("limit".into());
        let _ = LarderError::Config("no key".into());
        let _ = LarderError::Provider {
            message: "Request failed".into(),
            source: None,
        };
        let _ = LarderError::Storage {
            source: Box::new(std::io::Error::other("io")),
        };
        let _ = LarderError::Internal("oops".into());
    }
}
