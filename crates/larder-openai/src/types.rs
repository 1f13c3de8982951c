// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the OpenAI completions and chat completions endpoints.
//!
//! The two endpoints accept and return structurally different JSON. The
//! request side is unified under [`QueryBody`]; the response side under
//! [`ProviderReply`], which normalizes content extraction for the broker.

use larder_core::{LarderError, ModelVersion, QueryPayload, QueryType, TokenUsage};
use serde::{Deserialize, Serialize};

use crate::prompts;

/// A single chat message in the chat completions format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Response format hint for the chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// The `json_object` structured output hint.
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Request body for either OpenAI endpoint.
///
/// Serialized untagged: the field set alone distinguishes the shapes
/// (`prompt` for completions, `messages` for chat).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QueryBody {
    /// Legacy `/v1/completions` body.
    Completion {
        model: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
        temperature: f32,
        max_tokens: u32,
    },
    /// `/v1/chat/completions` body.
    Chat {
        model: String,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        response_format: Option<ResponseFormat>,
    },
}

impl QueryBody {
    /// Builds the request body for a (version, query type) pair.
    ///
    /// An unmapped pair still produces a body, just without prompt content;
    /// the upstream rejection then speaks for itself.
    pub fn build(version: ModelVersion, query_type: QueryType, payload: &QueryPayload) -> Self {
        let prompt = prompts::prompt_for(version, query_type, payload);
        let model = prompts::model_for(version).to_string();
        let max_tokens = prompts::max_tokens_for(query_type);

        match version {
            ModelVersion::V3 => QueryBody::Completion {
                model,
                prompt,
                temperature: 0.0,
                max_tokens,
            },
            ModelVersion::V4 => QueryBody::Chat {
                model,
                messages: prompt
                    .map(|content| {
                        vec![ChatMessage {
                            role: "user".to_string(),
                            content,
                        }]
                    })
                    .unwrap_or_default(),
                temperature: 0.0,
                max_tokens,
                response_format: prompts::wants_json_response(version, query_type)
                    .then(ResponseFormat::json_object),
            },
        }
    }
}

/// One choice in a legacy completions response.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    pub finish_reason: Option<String>,
}

/// Legacy `/v1/completions` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: Option<TokenUsage>,
}

/// One choice in a chat completions response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

/// `/v1/chat/completions` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<TokenUsage>,
}

/// A parsed upstream reply from either endpoint.
///
/// Accessors hide the structural difference: completions carry content in
/// `choices[0].text`, chat in `choices[0].message.content`.
#[derive(Debug, Clone)]
pub enum ProviderReply {
    Completion(CompletionResponse),
    Chat(ChatResponse),
}

impl ProviderReply {
    /// Extracts the answer text from the first choice.
    pub fn content(&self) -> Result<&str, LarderError> {
        match self {
            ProviderReply::Completion(r) => r
                .choices
                .first()
                .map(|c| c.text.as_str())
                .ok_or_else(empty_choices),
            ProviderReply::Chat(r) => r
                .choices
                .first()
                .map(|c| c.message.content.as_str())
                .ok_or_else(empty_choices),
        }
    }

    /// Finish reason of the first choice, if reported.
    pub fn finish_reason(&self) -> Option<&str> {
        match self {
            ProviderReply::Completion(r) => {
                r.choices.first().and_then(|c| c.finish_reason.as_deref())
            }
            ProviderReply::Chat(r) => r.choices.first().and_then(|c| c.finish_reason.as_deref()),
        }
    }

    /// Model identifier the upstream reports it served the request with.
    pub fn model(&self) -> &str {
        match self {
            ProviderReply::Completion(r) => &r.model,
            ProviderReply::Chat(r) => &r.model,
        }
    }

    /// Token accounting, if reported.
    pub fn usage(&self) -> Option<&TokenUsage> {
        match self {
            ProviderReply::Completion(r) => r.usage.as_ref(),
            ProviderReply::Chat(r) => r.usage.as_ref(),
        }
    }
}

fn empty_choices() -> LarderError {
    LarderError::Provider {
        message: "Request failed".to_string(),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(item: &str, location: Option<&str>) -> QueryPayload {
        QueryPayload {
            item: Some(item.to_string()),
            stuff_location: location.map(|s| s.to_string()),
        }
    }

    #[test]
    fn completion_body_serializes_with_prompt() {
        let body = QueryBody::build(
            ModelVersion::V3,
            QueryType::Emoji,
            &payload("banana", None),
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo-instruct");
        assert_eq!(
            json["prompt"],
            "represent banana (food) with 1 emoji, no explaination"
        );
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["max_tokens"], 30);
        assert!(json.get("messages").is_none());
    }

    #[test]
    fn chat_body_serializes_with_messages() {
        let body = QueryBody::build(
            ModelVersion::V4,
            QueryType::Category,
            &payload("rice", None),
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4-0125-preview");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 60);
        assert!(json.get("prompt").is_none());
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn chat_durability_carries_json_response_format() {
        let body = QueryBody::build(
            ModelVersion::V4,
            QueryType::Durability,
            &payload("milk", Some("fridge")),
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn unmapped_pair_omits_prompt_but_still_serializes() {
        let body = QueryBody::build(ModelVersion::V3, QueryType::Object, &payload("box", None));
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("prompt").is_none());
        assert_eq!(json["max_tokens"], 100);
    }

    #[test]
    fn reply_content_from_both_shapes() {
        let completion: CompletionResponse = serde_json::from_value(serde_json::json!({
            "model": "gpt-3.5-turbo-instruct",
            "choices": [{"text": "\n\n🍌", "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        }))
        .unwrap();
        let reply = ProviderReply::Completion(completion);
        assert_eq!(reply.content().unwrap(), "\n\n🍌");
        assert_eq!(reply.finish_reason(), Some("stop"));
        assert_eq!(reply.usage().unwrap().total_tokens, 16);

        let chat: ChatResponse = serde_json::from_value(serde_json::json!({
            "model": "gpt-4-0125-preview",
            "choices": [{"message": {"role": "assistant", "content": "Produce"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 40, "completion_tokens": 2, "total_tokens": 42}
        }))
        .unwrap();
        let reply = ProviderReply::Chat(chat);
        assert_eq!(reply.content().unwrap(), "Produce");
        assert_eq!(reply.model(), "gpt-4-0125-preview");
    }

    #[test]
    fn empty_choices_is_an_error() {
        let chat: ChatResponse = serde_json::from_value(serde_json::json!({
            "model": "gpt-4-0125-preview",
            "choices": [],
            "usage": null
        }))
        .unwrap();
        let reply = ProviderReply::Chat(chat);
        assert!(reply.content().is_err());
        assert!(reply.finish_reason().is_none());
    }
}
