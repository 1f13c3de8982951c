// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./larder.toml` > `~/.config/larder/larder.toml` >
//! `/etc/larder/larder.toml` with environment variable overrides via the
//! `LARDER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LarderConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/larder/larder.toml` (system-wide)
/// 3. `~/.config/larder/larder.toml` (user XDG config)
/// 4. `./larder.toml` (local directory)
/// 5. `LARDER_*` environment variables
pub fn load_config() -> Result<LarderConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LarderConfig::default()))
        .merge(Toml::file("/etc/larder/larder.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("larder/larder.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("larder.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<LarderConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LarderConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LarderConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LarderConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `LARDER_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("LARDER_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: LARDER_OPENAI_API_KEY -> "openai_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("quota_", "quota.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
