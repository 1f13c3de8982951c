// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI API.
//!
//! Provides [`OpenAiClient`] which posts [`QueryBody`] requests to the
//! version-appropriate endpoint and parses the matching response shape.
//! Requests are sent exactly once: a failed call is reported to the caller,
//! never retried.

use std::time::{Duration, Instant};

use larder_core::{LarderError, ModelVersion};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::prompts::{self, OPENAI_BASE_URL};
use crate::types::{ChatResponse, CompletionResponse, ProviderReply, QueryBody};

/// HTTP client for OpenAI API communication.
///
/// Holds the bearer credential and a pooled connection. Missing credentials
/// are detectable up front via [`credential_configured`] so the broker can
/// reject before spending a network round trip.
///
/// [`credential_configured`]: OpenAiClient::credential_configured
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI API client.
    ///
    /// `api_key` may be absent; the client still constructs so startup never
    /// fails on a missing key, only requests do.
    pub fn new(api_key: Option<String>) -> Result<Self, LarderError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| LarderError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: OPENAI_BASE_URL.to_string(),
        })
    }

    /// True when a bearer credential is available.
    pub fn credential_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends one query to the endpoint matching `version` and parses the
    /// endpoint's response shape.
    ///
    /// Returns the parsed reply together with the wall-clock latency of the
    /// round trip. Transport failures, non-2xx statuses, and unparseable
    /// bodies all surface as the same provider error; the distinguishing
    /// detail goes to the log, not the caller.
    pub async fn query(
        &self,
        version: ModelVersion,
        body: &QueryBody,
    ) -> Result<(ProviderReply, Duration), LarderError> {
        let key = self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or(
            LarderError::Internal("OpenAI API key not configured".to_string()),
        )?;

        let url = format!("{}{}", self.base_url, prompts::endpoint_for(version));
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, %url, "upstream request failed to send");
                request_failed(Some(Box::new(e)))
            })?;

        let status = response.status();
        debug!(status = %status, version = %version, "upstream response received");

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %detail, "upstream returned error status");
            return Err(request_failed(None));
        }

        let text = response.text().await.map_err(|e| {
            warn!(error = %e, "failed to read upstream response body");
            request_failed(Some(Box::new(e)))
        })?;
        let elapsed = started.elapsed();

        let reply = match version {
            ModelVersion::V3 => serde_json::from_str::<CompletionResponse>(&text)
                .map(ProviderReply::Completion),
            ModelVersion::V4 => {
                serde_json::from_str::<ChatResponse>(&text).map(ProviderReply::Chat)
            }
        }
        .map_err(|e| {
            warn!(error = %e, body = %text, "failed to parse upstream response");
            request_failed(Some(Box::new(e)))
        })?;

        Ok((reply, elapsed))
    }
}

fn request_failed(source: Option<Box<dyn std::error::Error + Send + Sync>>) -> LarderError {
    LarderError::Provider {
        message: "Request failed".to_string(),
        source,
    }
}
