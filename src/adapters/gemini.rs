//! Google Gemini provider
//!
//! Calls `POST {base}/v1beta/models/{model}:generateContent`. The answer is
//! the text of the first candidate, with all its text parts concatenated.

use crate::adapters::http::JsonHttpClient;
use crate::adapters::Adapter;
use crate::config::{GeminiConfig, ProviderConfig};
use crate::error::{ProbeError, ProbeResult};
use crate::logging::log_debug;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// generateContent request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on reasoning parts, which are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

/// generateContent response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter(|part| !part.thought.unwrap_or(false))
            .filter_map(|part| part.text.as_deref())
            .collect();

        Some(text).filter(|t| !t.trim().is_empty())
    }
}

/// Adapter for the Gemini generateContent API
#[derive(Debug)]
pub struct GeminiAdapter {
    http: JsonHttpClient,
    config: GeminiConfig,
}

impl GeminiAdapter {
    pub fn new(config: GeminiConfig, http: JsonHttpClient) -> Self {
        log_debug!(
            provider = "gemini",
            has_api_key = config.api_key.is_some(),
            base_url = %config.base_url,
            default_model = %config.default_model,
            "Gemini adapter created"
        );

        Self { http, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.default_model
        )
    }

    fn build_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                    thought: None,
                }],
            }],
        }
    }

    fn extract_answer(&self, response: &GeminiResponse) -> ProbeResult<String> {
        if let Some(text) = response.text() {
            return Ok(text);
        }

        let block_reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref());
        if let Some(reason) = block_reason {
            return Err(ProbeError::response_parsing_error(format!(
                "Gemini blocked the prompt: {reason}"
            )));
        }

        Err(ProbeError::empty_answer(self.provider_id()))
    }
}

#[async_trait]
impl Adapter for GeminiAdapter {
    fn provider_id(&self) -> String {
        format!("gemini/{}", self.config.default_model)
    }

    async fn ask(&self, prompt: &str) -> ProbeResult<String> {
        self.config.validate()?;
        let api_key = self.config.api_key().unwrap_or_default();
        let headers = JsonHttpClient::api_key_headers("x-goog-api-key", api_key)?;
        let request = Self::build_request(prompt);

        let response: GeminiResponse = self
            .http
            .post_json("gemini", &self.endpoint(), &headers, &request)
            .await?;

        self.extract_answer(&response)
    }
}
