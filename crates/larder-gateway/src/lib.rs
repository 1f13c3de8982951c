// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Larder service.
//!
//! Exposes the query broker at `POST /v1/query`, the vision reducer's event
//! delivery at `POST /internal/v1/objects`, and a liveness probe at
//! `GET /health`.

pub mod handlers;
pub mod identity;
pub mod server;

pub use server::{build_router, start_server, GatewayState, ServerConfig};
