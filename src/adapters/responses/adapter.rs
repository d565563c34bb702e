//! OpenAI Responses adapter

use super::types::{InputMessage, ResponsesRequest, ResponsesTool};
use crate::adapters::http::JsonHttpClient;
use crate::adapters::Adapter;
use crate::config::{OpenAIConfig, ProviderConfig};
use crate::error::{ProbeError, ProbeResult};
use crate::logging::log_debug;
use crate::normalizer::ResponseNormalizer;
use async_trait::async_trait;
use serde_json::Value;

/// Adapter for the OpenAI Responses API
#[derive(Debug)]
pub struct ResponsesAdapter {
    http: JsonHttpClient,
    config: OpenAIConfig,
}

impl ResponsesAdapter {
    pub fn new(config: OpenAIConfig, http: JsonHttpClient) -> Self {
        log_debug!(
            provider = "openai",
            has_api_key = config.api_key.is_some(),
            base_url = %config.base_url,
            default_model = %config.default_model,
            web_search = config.enable_web_search,
            "Responses adapter created"
        );

        Self { http, config }
    }

    pub(crate) fn build_request(&self, prompt: &str) -> ResponsesRequest {
        let mut input = Vec::with_capacity(2);
        if !self.config.instructions.is_empty() {
            input.push(InputMessage {
                role: "system".to_string(),
                content: self.config.instructions.clone(),
            });
        }
        input.push(InputMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let tools = self.config.enable_web_search.then(|| {
            vec![ResponsesTool {
                tool_type: "web_search".to_string(),
            }]
        });

        ResponsesRequest {
            model: self.config.default_model.clone(),
            input,
            tools,
        }
    }

    /// Normalize the response; no text at all counts as no answer
    pub(crate) fn extract_answer(&self, response: &Value) -> ProbeResult<String> {
        let normalized = ResponseNormalizer::extract(response);

        log_debug!(
            provider = "openai",
            text_length = normalized.text.len(),
            citation_count = normalized.citations.len(),
            "Normalized Responses API output"
        );

        if normalized.text.trim().is_empty() {
            return Err(ProbeError::empty_answer(self.provider_id()));
        }
        Ok(normalized.render())
    }
}

#[async_trait]
impl Adapter for ResponsesAdapter {
    fn provider_id(&self) -> String {
        format!("openai/{}", self.config.default_model)
    }

    async fn ask(&self, prompt: &str) -> ProbeResult<String> {
        self.config.validate()?;
        let api_key = self.config.api_key().unwrap_or_default();
        let headers = JsonHttpClient::bearer_headers(api_key)?;
        let url = format!("{}/v1/responses", self.config.base_url.trim_end_matches('/'));
        let request = self.build_request(prompt);

        let response: Value = self
            .http
            .post_json("openai", &url, &headers, &request)
            .await?;

        self.extract_answer(&response)
    }
}
