//! Test helper utilities for llm-probe unit tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::adapters::MockAdapter;
use crate::error::ProbeError;
use crate::record::{MarkerTerm, ResultRecord};
use serde_json::{json, Value};

/// Adapter mock that always answers with `answer`
pub fn answering_adapter(provider_id: &str, answer: &str) -> MockAdapter {
    let mut adapter = MockAdapter::new();
    adapter
        .expect_provider_id()
        .return_const(provider_id.to_string());
    let answer = answer.to_string();
    adapter
        .expect_ask()
        .returning(move |_| Ok(answer.clone()));
    adapter
}

/// Adapter mock whose every call fails with a request error
pub fn failing_adapter(provider_id: &str, message: &str) -> MockAdapter {
    let mut adapter = MockAdapter::new();
    adapter
        .expect_provider_id()
        .return_const(provider_id.to_string());
    let message = message.to_string();
    adapter
        .expect_ask()
        .returning(move |_| Err(ProbeError::request_failed(message.clone(), None)));
    adapter
}

/// Responses-API output message holding the given content fragments
pub fn output_message(content: Vec<Value>) -> Value {
    json!({"type": "message", "role": "assistant", "content": content})
}

/// Textual fragment with a nested text object, the shape SDKs expose
pub fn text_fragment(value: &str, annotations: Vec<Value>) -> Value {
    json!({
        "type": "output_text",
        "text": {"value": value, "annotations": annotations}
    })
}

pub fn web_citation(url: &str, title: Option<&str>) -> Value {
    match title {
        Some(title) => json!({"type": "web_citation", "url": url, "title": title}),
        None => json!({"type": "web_citation", "url": url}),
    }
}

pub fn file_citation(file_id: &str, quote: Option<&str>) -> Value {
    match quote {
        Some(quote) => json!({
            "type": "file_citation",
            "file_citation": {"file_id": file_id, "quote": quote}
        }),
        None => json!({"type": "file_citation", "file_citation": {"file_id": file_id}}),
    }
}

pub fn success_record(provider: &str, answer: &str) -> ResultRecord {
    ResultRecord::success(provider, "test prompt", 1, answer, &MarkerTerm::default())
}

pub fn error_record(provider: &str, message: &str) -> ResultRecord {
    ResultRecord::error(provider, "test prompt", 1, message)
}
