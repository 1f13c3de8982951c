// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Larder query broker.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Larder configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; only `openai.api_key` has no usable default.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LarderConfig {
    /// Service-wide settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Gateway bind settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// OpenAI provider settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Weekly quota ceilings per caller class.
    #[serde(default)]
    pub quota: QuotaConfig,

    /// Document and object store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Service-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gateway bind configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// OpenAI provider configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key for bearer authentication. `None` leaves the broker
    /// misconfigured: requests fail with an internal error, never a panic.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Weekly quota ceilings per caller class.
///
/// Admission uses strictly-greater comparison: a caller whose usage equals
/// the ceiling is still admitted for one more call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuotaConfig {
    /// Weekly ceiling for authenticated users.
    #[serde(default = "default_user_weekly_limit")]
    pub user_weekly_limit: u64,

    /// Weekly ceiling for guests (identified by request IP).
    #[serde(default = "default_guest_weekly_limit")]
    pub guest_weekly_limit: u64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            user_weekly_limit: default_user_weekly_limit(),
            guest_weekly_limit: default_guest_weekly_limit(),
        }
    }
}

fn default_user_weekly_limit() -> u64 {
    200
}

fn default_guest_weekly_limit() -> u64 {
    50
}

/// Document and object store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite database path for usage counters, logs, and object records.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Filesystem root under which object paths are resolved.
    #[serde(default = "default_object_root")]
    pub object_root: String,

    /// Base-location marker inside stored image paths; everything after it
    /// is `<identity>_<request>.<ext>`.
    #[serde(default = "default_image_base_location")]
    pub image_base_location: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            object_root: default_object_root(),
            image_base_location: default_image_base_location(),
        }
    }
}

fn default_database_path() -> String {
    "larder.db".to_string()
}

fn default_object_root() -> String {
    "data".to_string()
}

fn default_image_base_location() -> String {
    "images/".to_string()
}
