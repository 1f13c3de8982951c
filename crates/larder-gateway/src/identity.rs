// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller identity extraction from request headers.
//!
//! The gateway sits behind a fronting platform that authenticates callers
//! and injects `x-authenticated-uid` for signed-in requests. The remote IP
//! is taken from the usual proxy headers; it identifies guest callers for
//! quota purposes only, so spoofing buys a spoofer nothing but someone
//! else's quota.

use axum::http::HeaderMap;
use larder_broker::RequestContext;

/// Trusted header carrying the authenticated caller uid.
pub const AUTH_UID_HEADER: &str = "x-authenticated-uid";

/// Builds the broker request context from request headers.
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext {
        uid: header_str(headers, AUTH_UID_HEADER),
        remote_ip: remote_ip(headers),
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Remote IP resolution: first `x-forwarded-for` hop, then `x-real-ip`.
fn remote_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        let first = forwarded.split(',').next().unwrap_or("").trim();
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }
    header_str(headers, "x-real-ip")
}
