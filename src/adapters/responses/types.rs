//! OpenAI Responses API request structures
//!
//! The response side is read as a raw [`serde_json::Value`] because its
//! shape varies between API versions; see [`crate::normalizer`].

use serde::{Deserialize, Serialize};

/// Message in the request `input` list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMessage {
    pub role: String,
    pub content: String,
}

/// Hosted tool enabled for the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsesTool {
    #[serde(rename = "type")]
    pub tool_type: String, // "web_search"
}

/// Responses API request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ResponsesTool>>,
}
