// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static prompt, model, and token-limit mapping tables.
//!
//! Each (model version, query type) pair maps to a prompt template. The
//! tables are pure lookups: an unmapped pair yields `None` and the broker
//! decides what to do with it.

use larder_core::{ModelVersion, QueryPayload, QueryType};

/// Production base URL for the OpenAI API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Returns the endpoint path for a model version.
///
/// V3 models use the legacy completions endpoint; V4 models use the chat
/// completions endpoint. The two return structurally different responses.
pub fn endpoint_for(version: ModelVersion) -> &'static str {
    match version {
        ModelVersion::V3 => "/v1/completions",
        ModelVersion::V4 => "/v1/chat/completions",
    }
}

/// Returns the concrete model identifier sent upstream for a version.
pub fn model_for(version: ModelVersion) -> &'static str {
    match version {
        ModelVersion::V3 => "gpt-3.5-turbo-instruct",
        ModelVersion::V4 => "gpt-4-0125-preview",
    }
}

/// Returns the completion token ceiling for a query type.
pub fn max_tokens_for(query_type: QueryType) -> u32 {
    match query_type {
        QueryType::Durability => 90,
        QueryType::Emoji => 30,
        QueryType::Category => 60,
        QueryType::Object => 100,
    }
}

/// Expands a raw storage-location value into prompt text.
///
/// Known locations get fixed phrasing; anything else is passed through as
/// `"in <raw>"`.
pub fn location_text(raw: &str) -> String {
    match raw {
        "freezer" => "in freezer".to_string(),
        "fridge" => "in fridge".to_string(),
        "outside" => "outside of fridge".to_string(),
        other => format!("in {other}"),
    }
}

/// Builds the prompt for a (version, query type) pair, or `None` when the
/// pair has no mapping.
///
/// Missing payload fields render as empty strings rather than failing; the
/// broker validates `item` presence before this is reached.
pub fn prompt_for(
    version: ModelVersion,
    query_type: QueryType,
    payload: &QueryPayload,
) -> Option<String> {
    let item = payload.item.as_deref().unwrap_or("");
    let location = payload
        .stuff_location
        .as_deref()
        .map(location_text)
        .unwrap_or_default();

    match (version, query_type) {
        (ModelVersion::V3, QueryType::Durability) => Some(format!(
            "get {item} shelf life {location}, in JSON format {{h: number, d: number, r:boolean, c:string}}, h:number of hours, d: number of days, r: is this recommended, c:comment strictly under 20 words."
        )),
        (ModelVersion::V3, QueryType::Emoji) => Some(format!(
            "represent {item} (food) with 1 emoji, no explaination"
        )),
        (ModelVersion::V4, QueryType::Durability) => Some(format!(
            "{item} shelf life {location}, JSON {{h: number, d: number, r:boolean, c:string}}, h:number of hours, d: number of days, r: is this recommended, c:comment strictly under 20 words. No new lines"
        )),
        (ModelVersion::V4, QueryType::Emoji) => Some(format!(
            "only 1 emoji for {item} (food), no explaination"
        )),
        (ModelVersion::V4, QueryType::Category) => Some(format!(
            "which category in Meal,Seafood,Dairy,Meat,Produce,Condiments,Drinks,Others,Grains,Baked,Canned,Snacks,Sauces,Spices,Oils does {item} belong, no explaination"
        )),
        _ => None,
    }
}

/// True when the pair gets a structured JSON response format hint.
///
/// Only chat-endpoint durability queries carry `response_format`; the legacy
/// completions endpoint does not accept it.
pub fn wants_json_response(version: ModelVersion, query_type: QueryType) -> bool {
    version == ModelVersion::V4 && query_type == QueryType::Durability
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
    fn endpoints_differ_by_version() {
        assert_eq!(endpoint_for(ModelVersion::V3), "/v1/completions");
        assert_eq!(endpoint_for(ModelVersion::V4), "/v1/chat/completions");
    }

    #[test]
    fn models_are_pinned() {
        assert_eq!(model_for(ModelVersion::V3), "gpt-3.5-turbo-instruct");
        assert_eq!(model_for(ModelVersion::V4), "gpt-4-0125-preview");
    }

    #[test]
    fn token_ceilings_per_query_type() {
        assert_eq!(max_tokens_for(QueryType::Durability), 90);
        assert_eq!(max_tokens_for(QueryType::Emoji), 30);
        assert_eq!(max_tokens_for(QueryType::Category), 60);
        assert_eq!(max_tokens_for(QueryType::Object), 100);
    }

    #[test]
    fn location_text_known_and_fallback() {
        assert_eq!(location_text("freezer"), "in freezer");
        assert_eq!(location_text("fridge"), "in fridge");
        assert_eq!(location_text("outside"), "outside of fridge");
        assert_eq!(location_text("pantry"), "in pantry");
    }

    #[test]
    fn v3_durability_prompt_includes_location() {
        let p = prompt_for(
            ModelVersion::V3,
            QueryType::Durability,
            &payload("milk", Some("fridge")),
        )
        .unwrap();
        assert!(p.starts_with("get milk shelf life in fridge,"), "got: {p}");
        assert!(p.contains("{h: number, d: number, r:boolean, c:string}"));
    }

    #[test]
    fn v4_durability_prompt_has_no_newline_clause() {
        let p = prompt_for(
            ModelVersion::V4,
            QueryType::Durability,
            &payload("bread", Some("outside")),
        )
        .unwrap();
        assert!(p.starts_with("bread shelf life outside of fridge,"), "got: {p}");
        assert!(p.ends_with("No new lines"));
    }

    #[test]
    fn emoji_prompts_per_version() {
        let v3 = prompt_for(ModelVersion::V3, QueryType::Emoji, &payload("apple", None)).unwrap();
        assert_eq!(v3, "represent apple (food) with 1 emoji, no explaination");

        let v4 = prompt_for(ModelVersion::V4, QueryType::Emoji, &payload("apple", None)).unwrap();
        assert_eq!(v4, "only 1 emoji for apple (food), no explaination");
    }

    #[test]
    fn category_prompt_only_mapped_for_v4() {
        assert!(prompt_for(ModelVersion::V3, QueryType::Category, &payload("rice", None)).is_none());
        let v4 =
            prompt_for(ModelVersion::V4, QueryType::Category, &payload("rice", None)).unwrap();
        assert!(v4.contains("Meal,Seafood,Dairy,Meat,Produce"));
        assert!(v4.contains("does rice belong"));
    }

    #[test]
    fn object_query_type_is_unmapped() {
        assert!(prompt_for(ModelVersion::V3, QueryType::Object, &payload("box", None)).is_none());
        assert!(prompt_for(ModelVersion::V4, QueryType::Object, &payload("box", None)).is_none());
    }

    #[test]
    fn json_response_format_only_for_chat_durability() {
        assert!(wants_json_response(ModelVersion::V4, QueryType::Durability));
        assert!(!wants_json_response(ModelVersion::V3, QueryType::Durability));
        assert!(!wants_json_response(ModelVersion::V4, QueryType::Emoji));
        assert!(!wants_json_response(ModelVersion::V4, QueryType::Category));
    }
}
