//! Test helper utilities for llm-probe integration tests
//!
//! Provider configs pointed at a wiremock server, plus canned provider
//! response bodies.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use llm_probe::{
    GeminiConfig, MistralConfig, OpenAIConfig, PerplexityConfig, ProvidersConfig, SamplingParams,
};
use serde_json::{json, Value};

pub const TEST_PROMPT: &str = "What is the best health insurance for freelancers in France?";

pub fn openai_config(base_url: &str) -> OpenAIConfig {
    OpenAIConfig {
        api_key: Some("test-openai-key".to_string()),
        base_url: base_url.to_string(),
        ..OpenAIConfig::default()
    }
}

pub fn gemini_config(base_url: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: Some("test-google-key".to_string()),
        base_url: base_url.to_string(),
        ..GeminiConfig::default()
    }
}

pub fn mistral_config(base_url: &str) -> MistralConfig {
    MistralConfig {
        api_key: Some("test-mistral-key".to_string()),
        base_url: base_url.to_string(),
        default_model: "mistral-medium-2508".to_string(),
        params: SamplingParams::chat_defaults(),
    }
}

pub fn perplexity_config(base_url: &str) -> PerplexityConfig {
    PerplexityConfig {
        api_key: Some("test-perplexity-key".to_string()),
        base_url: base_url.to_string(),
        ..PerplexityConfig::default()
    }
}

/// Every provider pointed at the same mock server
pub fn providers_config(base_url: &str) -> ProvidersConfig {
    ProvidersConfig {
        openai: openai_config(base_url),
        gemini: gemini_config(base_url),
        mistral: mistral_config(base_url),
        perplexity: perplexity_config(base_url),
    }
}

/// Responses API body carrying only the convenience text
pub fn responses_convenience_body(text: &str) -> Value {
    json!({
        "id": "resp_test",
        "object": "response",
        "status": "completed",
        "output_text": text,
        "output": []
    })
}

/// Responses API body with a web search call and a cited message
pub fn responses_cited_body() -> Value {
    json!({
        "id": "resp_cited",
        "object": "response",
        "status": "completed",
        "output": [
            {"type": "web_search_call", "id": "ws_1", "status": "completed"},
            {
                "type": "message",
                "role": "assistant",
                "content": [
                    {"type": "output_text", "text": "Part A.", "annotations": []},
                    {
                        "type": "output_text",
                        "text": "Part B.",
                        "annotations": [
                            {"type": "url_citation", "url": "https://x.test", "title": "Source", "start_index": 0, "end_index": 7}
                        ]
                    }
                ]
            }
        ]
    })
}

pub fn chat_body(content: &str) -> Value {
    json!({
        "id": "chat_test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
    })
}

pub fn gemini_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
    })
}

/// A local address nothing listens on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
