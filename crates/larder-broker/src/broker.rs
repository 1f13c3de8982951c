// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The query broker: admission, quota enforcement, the provider round trip,
//! and usage accounting.
//!
//! Validation runs strictly before any network traffic; a rejected request
//! never reaches the provider. After a successful round trip the broker
//! increments the caller's weekly counter and appends one usage log entry.
//! Those writes are best-effort: the caller already has their answer, so a
//! write failure is logged and swallowed.

use std::str::FromStr;
use std::sync::Arc;

use larder_core::{
    AiResponse, CallerIdentity, DocumentStore, LarderError, ModelVersion, QueryRequest, QueryType,
    UsageLogEntry, UserClass,
};
use larder_openai::{prompts, OpenAiClient, QueryBody};
use tracing::{debug, info, warn};

/// Weekly quota ceilings per caller class.
#[derive(Debug, Clone, Copy)]
pub struct QuotaLimits {
    pub user_weekly_limit: u64,
    pub guest_weekly_limit: u64,
}

impl QuotaLimits {
    fn ceiling(&self, class: UserClass) -> u64 {
        match class {
            UserClass::User => self.user_weekly_limit,
            UserClass::Guest => self.guest_weekly_limit,
        }
    }
}

impl From<&larder_config::model::QuotaConfig> for QuotaLimits {
    fn from(config: &larder_config::model::QuotaConfig) -> Self {
        Self {
            user_weekly_limit: config.user_weekly_limit,
            guest_weekly_limit: config.guest_weekly_limit,
        }
    }
}

/// Ambient request context, resolved by the transport layer.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Authenticated caller uid, when present.
    pub uid: Option<String>,
    /// Remote IP of the request, when resolvable.
    pub remote_ip: Option<String>,
}

/// The query broker.
///
/// Owns the provider client and a handle to the document store; one instance
/// serves all requests concurrently.
pub struct QueryBroker {
    store: Arc<dyn DocumentStore>,
    client: OpenAiClient,
    limits: QuotaLimits,
}

impl QueryBroker {
    pub fn new(store: Arc<dyn DocumentStore>, client: OpenAiClient, limits: QuotaLimits) -> Self {
        Self {
            store,
            client,
            limits,
        }
    }

    /// Runs one query end to end.
    ///
    /// The validation sequence is ordered and short-circuits: identity,
    /// request id, model version, query type, required item (all types but
    /// `object`), provider credential, then quota. Only after all of these
    /// pass does a request go upstream.
    pub async fn handle_query(
        &self,
        ctx: &RequestContext,
        request: QueryRequest,
    ) -> Result<AiResponse, LarderError> {
        let identity = resolve_identity(ctx)?;

        let request_id = non_empty(request.id.as_deref()).ok_or_else(missing_argument)?;

        let version = ModelVersion::from_str(&request.gpt).map_err(|_| {
            LarderError::InvalidArgument(format!("gpt version {} not supported", request.gpt))
        })?;
        let query_type = QueryType::from_str(&request.query_type).map_err(|_| {
            LarderError::InvalidArgument(format!(
                "query type {} not supported",
                request.query_type
            ))
        })?;

        // Object queries carry no item; every other type requires one.
        if query_type != QueryType::Object {
            non_empty(request.query.item.as_deref()).ok_or_else(missing_argument)?;
        }

        if !self.client.credential_configured() {
            return Err(LarderError::Provider {
                message: "API Error".to_string(),
                source: None,
            });
        }

        self.check_quota(&identity).await?;

        debug!(
            class = %identity.class,
            version = %version,
            query_type = %query_type,
            "admitting query"
        );

        let body = QueryBody::build(version, query_type, &request.query);
        let (reply, latency) = self.client.query(version, &body).await?;

        let response = AiResponse {
            id: Some(request_id.to_string()),
            content: reply.content()?.to_string(),
            finish_reason: reply.finish_reason().unwrap_or_default().to_string(),
            model: reply.model().to_string(),
        };

        // For durability the log kind is the storage location; for every
        // other type it is the query type itself.
        let kind = match query_type {
            QueryType::Durability => request
                .query
                .stuff_location
                .clone()
                .unwrap_or_else(|| query_type.to_string()),
            other => other.to_string(),
        };

        let entry = UsageLogEntry {
            entry_id: request_id.to_string(),
            kind,
            model: prompts::model_for(version).to_string(),
            finish_reason: reply.finish_reason().map(|s| s.to_string()),
            usage: reply.usage().copied(),
            objects: None,
            response_time_ms: latency.as_millis() as i64,
            file_size: None,
        };
        self.record_usage(&identity, &entry).await;

        info!(
            class = %identity.class,
            model = %response.model,
            latency_ms = entry.response_time_ms,
            "query served"
        );

        Ok(response)
    }

    /// Read-then-compare admission check.
    ///
    /// The comparison is strictly-greater: a caller whose usage equals the
    /// ceiling is still admitted. The read is not transactional with the
    /// later increment; concurrent requests can each pass the check and
    /// overshoot by a few calls, which is acceptable for a soft quota.
    async fn check_quota(&self, identity: &CallerIdentity) -> Result<(), LarderError> {
        let usage = self
            .store
            .weekly_usage(identity.class, &identity.id)
            .await?
            .unwrap_or(0);
        let ceiling = self.limits.ceiling(identity.class);

        if usage > ceiling {
            warn!(class = %identity.class, usage, ceiling, "weekly quota exhausted");
            return Err(LarderError::ResourceExhausted(format!(
                "Usage limit for {} reached weekly limit of {}",
                identity.class, ceiling
            )));
        }
        Ok(())
    }

    /// Increments the weekly counter and appends the usage log entry.
    ///
    /// Best-effort: the caller's response is already assembled, so failures
    /// here are logged and never surfaced.
    async fn record_usage(&self, identity: &CallerIdentity, entry: &UsageLogEntry) {
        if let Err(e) = self
            .store
            .increment_weekly_usage(identity.class, &identity.id)
            .await
        {
            warn!(error = %e, class = %identity.class, "failed to increment weekly usage");
        }
        if let Err(e) = self
            .store
            .append_usage_log(identity.class, &identity.id, entry)
            .await
        {
            warn!(error = %e, class = %identity.class, "failed to append usage log entry");
        }
    }
}

/// Resolves the caller identity: authenticated uid first, request IP as the
/// guest fallback, otherwise the request is unauthenticated.
fn resolve_identity(ctx: &RequestContext) -> Result<CallerIdentity, LarderError> {
    if let Some(uid) = non_empty(ctx.uid.as_deref()) {
        return Ok(CallerIdentity {
            class: UserClass::User,
            id: uid.to_string(),
        });
    }
    if let Some(ip) = non_empty(ctx.remote_ip.as_deref()) {
        return Ok(CallerIdentity {
            class: UserClass::Guest,
            id: ip.to_string(),
        });
    }
    Err(LarderError::Unauthenticated(
        "User not signed in".to_string(),
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn missing_argument() -> LarderError {
    LarderError::InvalidArgument("missing argument".to_string())
}
