//! # llm-probe
//!
//! Send the same prompt to several hosted LLM providers and collect the
//! answers into a CSV file for side-by-side inspection.
//!
//! ## Key Features
//!
//! - **Multiple Providers**: OpenAI (Responses API with web search), Google
//!   Gemini, Mistral and Perplexity
//! - **Citation Tables**: cited sources are deduplicated and appended to the
//!   answer as a Markdown table
//! - **Marker Detection**: every answer is checked for a configurable term
//! - **Failure Isolation**: a failing provider becomes an error row, the run
//!   carries on
//!
//! ## Example
//!
//! ```rust,no_run
//! use llm_probe::{build_adapters, CsvSink, MarkerTerm, ProvidersConfig, RunConfig, Runner};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RunConfig::default();
//! let adapters = build_adapters(
//!     &ProvidersConfig::from_env(),
//!     &config.providers,
//!     config.request_timeout,
//! )?;
//! let runner = Runner::new(adapters, MarkerTerm::new("alan"), config.call_delay);
//!
//! let prompts = vec!["What is the best health insurance for freelancers in France?".to_string()];
//! let records = runner.run_all(&prompts, config.iterations).await;
//! CsvSink::write(&records, &config.output_path)?;
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

pub(crate) mod logging;

pub mod adapters;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod prompts;
pub mod record;
pub mod runner;
pub mod sink;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use adapters::{build_adapter, build_adapters, invoke, Adapter, JsonHttpClient};
pub use config::{
    GeminiConfig, MistralConfig, OpenAIConfig, PerplexityConfig, ProviderConfig, ProviderKind,
    ProvidersConfig, RunConfig, SamplingParams,
};
pub use error::{ProbeError, ProbeResult};
pub use normalizer::{Citation, NormalizedResponse, ResponseNormalizer};
pub use prompts::load_prompts;
pub use record::{MarkerTerm, Outcome, ResultRecord, Status};
pub use runner::Runner;
pub use sink::CsvSink;
