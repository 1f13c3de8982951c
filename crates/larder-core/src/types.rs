// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the query broker, the vision reducer, and the
//! store adapter traits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Caller classification, which determines the weekly quota ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserClass {
    /// Authenticated caller, identified by uid.
    User,
    /// Unauthenticated caller, identified by request IP.
    Guest,
}

/// A resolved caller identity: class plus the identifying string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub class: UserClass,
    pub id: String,
}

/// Supported provider model generations.
///
/// The wire request carries the raw version string so rejections can name
/// the offending value; parsing into this closed enum is the validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ModelVersion {
    /// Completion-style model ("3.5").
    #[strum(serialize = "3.5")]
    V3,
    /// Chat-style model ("4").
    #[strum(serialize = "4")]
    V4,
}

/// The kind of prompt being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum QueryType {
    /// Shelf-life estimate for a food item at a storage location.
    Durability,
    /// Single-emoji representation of a food item.
    Emoji,
    /// Food category classification.
    Category,
    /// Object-detection log (vision pipeline; no prompt mapping).
    Object,
}

/// Query payload carried inside a [`QueryRequest`].
///
/// `stuff_location` stays a raw string: unknown forward-compatible values
/// must still produce a prompt via the textual fallback, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryPayload {
    /// The food item the query is about. Required for every type except `object`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// Storage location for durability queries ("freezer", "fridge", "outside", …).
    #[serde(
        default,
        rename = "stuffLocation",
        skip_serializing_if = "Option::is_none"
    )]
    pub stuff_location: Option<String>,
}

/// Wire shape of a broker invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// Caller-supplied request id; keys the usage log entry.
    #[serde(default)]
    pub id: Option<String>,
    /// Raw model version string ("3.5" or "4").
    pub gpt: String,
    /// Raw query type string.
    #[serde(rename = "queryType")]
    pub query_type: String,
    /// The query payload.
    pub query: QueryPayload,
}

/// Normalized broker result surfaced to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiResponse {
    /// The caller's request id, echoed back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// First-choice content, normalized across the two provider shapes.
    pub content: String,
    /// Provider-reported finish reason.
    pub finish_reason: String,
    /// Provider-reported model identifier.
    pub model: String,
}

/// Token usage summary reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One append-only usage log entry, recording a completed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageLogEntry {
    /// Entry id within the identity's log (the request id).
    pub entry_id: String,
    /// Kind discriminator: query type, or the storage location for durability.
    pub kind: String,
    /// Model identifier that served the operation.
    pub model: String,
    /// Provider-reported finish reason, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Token usage, when the operation was an LLM call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Detected object list, when the operation was a vision classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<String>>,
    /// Wall-clock latency of the operation in milliseconds.
    pub response_time_ms: i64,
    /// Size of the processed file in bytes, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

/// The triggering record of the vision pipeline (`objects/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDoc {
    /// Storage path of the uploaded image, embedding `<identity>_<request>.<ext>`.
    pub file: String,
    /// Detected object labels.
    pub objects: Vec<String>,
}

/// Metadata of a stored object, as the vision reducer needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectMetadata {
    /// Creation timestamp of the object.
    pub created_at: DateTime<Utc>,
    /// Object size in bytes.
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn user_class_displays_lowercase() {
        assert_eq!(UserClass::User.to_string(), "user");
        assert_eq!(UserClass::Guest.to_string(), "guest");
    }

    #[test]
    fn model_version_parses_wire_strings() {
        assert_eq!(ModelVersion::from_str("3.5").unwrap(), ModelVersion::V3);
        assert_eq!(ModelVersion::from_str("4").unwrap(), ModelVersion::V4);
        assert!(ModelVersion::from_str("5").is_err());
        assert!(ModelVersion::from_str("").is_err());
    }

    #[test]
    fn model_version_displays_wire_strings() {
        assert_eq!(ModelVersion::V3.to_string(), "3.5");
        assert_eq!(ModelVersion::V4.to_string(), "4");
    }

    #[test]
    fn query_type_round_trips() {
        for (raw, qt) in [
            ("durability", QueryType::Durability),
            ("emoji", QueryType::Emoji),
            ("category", QueryType::Category),
            ("object", QueryType::Object),
        ] {
            assert_eq!(QueryType::from_str(raw).unwrap(), qt);
            assert_eq!(qt.to_string(), raw);
        }
        assert!(QueryType::from_str("recipe").is_err());
    }

    #[test]
    fn query_request_deserializes_camel_case() {
        let json = r#"{
            "id": "req-1",
            "gpt": "4",
            "queryType": "durability",
            "query": {"item": "milk", "stuffLocation": "fridge"}
        }"#;
        let req: QueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id.as_deref(), Some("req-1"));
        assert_eq!(req.gpt, "4");
        assert_eq!(req.query_type, "durability");
        assert_eq!(req.query.item.as_deref(), Some("milk"));
        assert_eq!(req.query.stuff_location.as_deref(), Some("fridge"));
    }

    #[test]
    fn query_request_tolerates_missing_optionals() {
        let json = r#"{"gpt": "3.5", "queryType": "emoji", "query": {}}"#;
        let req: QueryRequest = serde_json::from_str(json).unwrap();
        assert!(req.id.is_none());
        assert!(req.query.item.is_none());
        assert!(req.query.stuff_location.is_none());
    }

    #[test]
    fn ai_response_omits_absent_id() {
        let resp = AiResponse {
            id: None,
            content: "🥛".into(),
            finish_reason: "stop".into(),
            model: "gpt-4-0125-preview".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["finish_reason"], "stop");
    }

    #[test]
    fn usage_log_entry_skips_empty_fields() {
        let entry = UsageLogEntry {
            entry_id: "r1".into(),
            kind: "emoji".into(),
            model: "gpt-4-0125-preview".into(),
            finish_reason: Some("stop".into()),
            usage: Some(TokenUsage {
                prompt_tokens: 12,
                completion_tokens: 3,
                total_tokens: 15,
            }),
            objects: None,
            response_time_ms: 420,
            file_size: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("objects").is_none());
        assert!(json.get("file_size").is_none());
        assert_eq!(json["usage"]["total_tokens"], 15);
    }
}
