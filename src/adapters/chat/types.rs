//! OpenAI-compatible chat completion request/response structures

use serde::{Deserialize, Serialize};

/// Chat message sent to the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Chat completion response
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// Choice in a chat completion response
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

/// Message in a response choice
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<ChatContent>,
}

/// Mistral may answer with a list of typed chunks instead of a string
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum ChatContent {
    Text(String),
    Chunks(Vec<ContentChunk>),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ContentChunk {
    #[serde(rename = "type", default)]
    pub chunk_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl ChatContent {
    /// Plain text of the message; non-text chunks are skipped
    pub fn into_text(self) -> String {
        match self {
            ChatContent::Text(text) => text,
            ChatContent::Chunks(chunks) => chunks
                .into_iter()
                .filter(|chunk| chunk.chunk_type.as_deref().unwrap_or("text") == "text")
                .filter_map(|chunk| chunk.text)
                .collect::<Vec<_>>()
                .join(""),
        }
    }
}
