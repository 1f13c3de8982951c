// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Larder query broker.

use thiserror::Error;

/// The primary error type used across the broker, reducer, and adapter traits.
#[derive(Debug, Error)]
pub enum LarderError {
    /// No caller identity could be resolved (no authenticated uid, no request IP).
    #[error("{0}")]
    Unauthenticated(String),

    /// The request carried a missing, malformed, or unsupported argument.
    #[error("{0}")]
    InvalidArgument(String),

    /// The caller's weekly usage quota is exhausted.
    #[error("{0}")]
    ResourceExhausted(String),

    /// Configuration errors (missing credential, invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// LLM provider errors (non-2xx status, transport failure, unparseable body).
    #[error("{message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Document or object store errors (query failure, missing file, I/O).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LarderError {
    /// Stable machine-readable error kind surfaced on the wire.
    ///
    /// Provider, config, and storage failures all collapse to `internal`
    /// so upstream detail never leaks to callers; the full error stays in
    /// the tracing output for operator-side diagnosis.
    pub fn code(&self) -> &'static str {
        match self {
            LarderError::Unauthenticated(_) => "unauthenticated",
            LarderError::InvalidArgument(_) => "invalid-argument",
            LarderError::ResourceExhausted(_) => "resource-exhausted",
            LarderError::Config(_)
            | LarderError::Provider { .. }
            | LarderError::Storage { .. }
            | LarderError::Internal(_) => "internal",
        }
    }
}
