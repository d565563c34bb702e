//! Chat completions adapter

use super::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::adapters::http::JsonHttpClient;
use crate::adapters::Adapter;
use crate::config::{MistralConfig, PerplexityConfig, ProviderConfig, SamplingParams};
use crate::error::{ProbeError, ProbeResult};
use crate::logging::log_debug;
use async_trait::async_trait;

/// Adapter for providers speaking the OpenAI chat completions dialect
#[derive(Debug)]
pub struct ChatCompletionsAdapter {
    http: JsonHttpClient,
    config: Box<dyn ProviderConfig>,
    path: &'static str,
    params: SamplingParams,
}

impl ChatCompletionsAdapter {
    /// Mistral at `{base}/v1/chat/completions`
    pub fn mistral(config: MistralConfig, http: JsonHttpClient) -> Self {
        let params = config.params.clone();
        Self::new(Box::new(config), "/v1/chat/completions", params, http)
    }

    /// Perplexity at `{base}/chat/completions`
    pub fn perplexity(config: PerplexityConfig, http: JsonHttpClient) -> Self {
        let params = config.params.clone();
        Self::new(Box::new(config), "/chat/completions", params, http)
    }

    pub fn new(
        config: Box<dyn ProviderConfig>,
        path: &'static str,
        params: SamplingParams,
        http: JsonHttpClient,
    ) -> Self {
        log_debug!(
            provider = config.provider_name(),
            has_api_key = config.api_key().is_some(),
            base_url = %config.base_url(),
            default_model = %config.default_model(),
            "Chat completions adapter created"
        );

        Self {
            http,
            config,
            path,
            params,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.config.base_url().trim_end_matches('/'), self.path)
    }

    pub(crate) fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.default_model().to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        }
    }

    /// First choice's message text; blank text counts as no answer
    pub(crate) fn extract_answer(&self, response: ChatResponse) -> ProbeResult<String> {
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            ProbeError::response_parsing_error(format!(
                "No choices in {} response",
                self.config.provider_name()
            ))
        })?;

        let answer = choice.message.content.map(|c| c.into_text()).unwrap_or_default();
        if answer.trim().is_empty() {
            return Err(ProbeError::empty_answer(self.provider_id()));
        }
        Ok(answer)
    }
}

#[async_trait]
impl Adapter for ChatCompletionsAdapter {
    fn provider_id(&self) -> String {
        format!(
            "{}/{}",
            self.config.provider_name(),
            self.config.default_model()
        )
    }

    async fn ask(&self, prompt: &str) -> ProbeResult<String> {
        self.config.validate()?;
        let api_key = self.config.api_key().unwrap_or_default();
        let headers = JsonHttpClient::bearer_headers(api_key)?;
        let request = self.build_request(prompt);

        let response: ChatResponse = self
            .http
            .post_json(
                self.config.provider_name(),
                &self.endpoint(),
                &headers,
                &request,
            )
            .await?;

        self.extract_answer(response)
    }
}
