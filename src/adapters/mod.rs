//! Provider adapters
//!
//! Each adapter performs one request/response exchange with one hosted
//! provider:
//!
//! - **chat**: OpenAI-compatible chat completions (Mistral, Perplexity)
//! - **responses**: OpenAI Responses API with web search, flattened by the
//!   [`ResponseNormalizer`](crate::normalizer::ResponseNormalizer)
//! - **gemini**: Google generateContent API
//! - **http**: the JSON client all of them share
//!
//! ```text
//! http.rs  <- one reqwest client per run
//!    |          |            |
//! chat/     responses/    gemini.rs
//! ```
//!
//! Adapters return `ProbeResult<String>`; [`invoke`] is the failure boundary
//! that turns that into a [`ResultRecord`] so no provider error ever reaches
//! the run orchestrator.

pub mod chat;
pub mod gemini;
pub mod http;
pub mod responses;

pub use chat::ChatCompletionsAdapter;
pub use gemini::GeminiAdapter;
pub use http::JsonHttpClient;
pub use responses::ResponsesAdapter;

use crate::config::{ProviderKind, ProvidersConfig};
use crate::error::{ErrorSeverity, ProbeResult};
use crate::logging::{log_debug, log_error, log_warn};
use crate::record::{MarkerTerm, ResultRecord};
use async_trait::async_trait;
use std::time::Duration;

/// One hosted provider that can answer a prompt
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Adapter: Send + Sync {
    /// `provider/model` identifier written to every record
    fn provider_id(&self) -> String;

    /// Send `prompt` and return the plain-text answer
    async fn ask(&self, prompt: &str) -> ProbeResult<String>;
}

/// Ask one adapter and turn the outcome into a record. Never fails.
pub async fn invoke(
    adapter: &dyn Adapter,
    prompt: &str,
    iteration: u32,
    marker: &MarkerTerm,
) -> ResultRecord {
    let provider = adapter.provider_id();

    match adapter.ask(prompt).await {
        Ok(answer) => {
            let record = ResultRecord::success(&provider, prompt, iteration, answer, marker);
            log_debug!(
                provider = %provider,
                run_number = iteration,
                marker_mentioned = record.marker_mentioned().unwrap_or(false),
                "Provider answered"
            );
            record
        }
        Err(error) => {
            match error.severity() {
                ErrorSeverity::Critical | ErrorSeverity::Error => log_error!(
                    provider = %provider,
                    run_number = iteration,
                    error = %error,
                    "Provider call failed, recording error"
                ),
                ErrorSeverity::Warning => log_warn!(
                    provider = %provider,
                    run_number = iteration,
                    error = %error,
                    "Provider call failed, recording error"
                ),
            }
            ResultRecord::error(&provider, prompt, iteration, error.to_string())
        }
    }
}

/// Build one adapter around an existing HTTP client
pub fn build_adapter(
    kind: ProviderKind,
    providers: &ProvidersConfig,
    http: &JsonHttpClient,
) -> Box<dyn Adapter> {
    match kind {
        ProviderKind::OpenAI => Box::new(ResponsesAdapter::new(
            providers.openai.clone(),
            http.clone(),
        )),
        ProviderKind::Gemini => {
            Box::new(GeminiAdapter::new(providers.gemini.clone(), http.clone()))
        }
        ProviderKind::Mistral => Box::new(ChatCompletionsAdapter::mistral(
            providers.mistral.clone(),
            http.clone(),
        )),
        ProviderKind::Perplexity => Box::new(ChatCompletionsAdapter::perplexity(
            providers.perplexity.clone(),
            http.clone(),
        )),
    }
}

/// Build adapters for `kinds`, keeping their order
///
/// Missing credentials do not fail here; they surface as error records on
/// the first call.
///
/// # Errors
///
/// Returns [`crate::ProbeError::ConfigurationError`] if the HTTP client
/// cannot be built.
pub fn build_adapters(
    providers: &ProvidersConfig,
    kinds: &[ProviderKind],
    request_timeout: Option<Duration>,
) -> ProbeResult<Vec<Box<dyn Adapter>>> {
    let http = JsonHttpClient::new(request_timeout)?;
    let adapters: Vec<Box<dyn Adapter>> = kinds
        .iter()
        .map(|kind| build_adapter(*kind, providers, &http))
        .collect();

    log_debug!(
        adapter_count = adapters.len(),
        providers = ?kinds,
        "Provider adapters created"
    );

    Ok(adapters)
}
