// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /v1/query, POST /internal/v1/objects, GET /health.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use larder_core::{AiResponse, LarderError, QueryRequest};
use larder_vision::ObjectCreatedEvent;
use serde::Serialize;
use tracing::debug;

use crate::identity::request_context;
use crate::server::GatewayState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error kind.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Success envelope for POST /v1/query.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub response: AiResponse,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// POST /v1/query
///
/// Brokers one provider query for the caller identified by the request
/// headers.
pub async fn post_query(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<QueryRequest>,
) -> Response {
    let ctx = request_context(&headers);
    match state.broker.handle_query(&ctx, body).await {
        Ok(response) => (StatusCode::OK, Json(QueryResponse { response })).into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /internal/v1/objects
///
/// Delivery endpoint for object-record-created events. Always returns 204:
/// the reducer is best-effort and the event source does not redeliver.
pub async fn post_object_event(
    State(state): State<GatewayState>,
    Json(event): Json<ObjectCreatedEvent>,
) -> StatusCode {
    debug!(id = %event.id, "object event delivered");
    state.reducer.handle_object_created(&event).await;
    StatusCode::NO_CONTENT
}

/// GET /health
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn error_response(err: LarderError) -> Response {
    let status = match err.code() {
        "unauthenticated" => StatusCode::UNAUTHORIZED,
        "invalid-argument" => StatusCode::BAD_REQUEST,
        "resource-exhausted" => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = ErrorResponse {
        error: err.code().to_string(),
        message: err.to_string(),
    };
    (status, Json(body)).into_response()
}
