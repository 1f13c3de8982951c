// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use larder_broker::QueryBroker;
use larder_core::LarderError;
use larder_vision::VisionLogReducer;
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The query broker serving POST /v1/query.
    pub broker: Arc<QueryBroker>,
    /// The vision reducer serving POST /internal/v1/objects.
    pub reducer: Arc<VisionLogReducer>,
}

/// Gateway server configuration (mirrors GatewayConfig from larder-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the full route tree.
///
/// - POST /v1/query — the query broker
/// - POST /internal/v1/objects — object-event delivery for the reducer
/// - GET /health — liveness
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/v1/query", post(handlers::post_query))
        .route("/internal/v1/objects", post(handlers::post_object_event))
        .route("/health", get(handlers::get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the gateway HTTP server and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), LarderError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LarderError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| LarderError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
