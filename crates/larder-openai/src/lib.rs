// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapter for the Larder query broker.
//!
//! Covers both generations of the OpenAI text API: legacy completions for
//! V3 models and chat completions for V4 models. The prompt, model, and
//! token-limit tables live in [`prompts`]; the wire shapes in [`types`];
//! the HTTP plumbing in [`client`].

pub mod client;
pub mod prompts;
pub mod types;

pub use client::OpenAiClient;
pub use prompts::OPENAI_BASE_URL;
pub use types::{ProviderReply, QueryBody};
