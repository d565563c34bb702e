//! Provider and run configuration.
//!
//! Provider configs carry credentials, endpoints and model names. They are
//! loaded from the environment but never validated at start-up: a missing API
//! key only surfaces as an error record the first time the provider is asked.

use crate::error::{ProbeError, ProbeResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Trait for provider-specific configuration
pub trait ProviderConfig: Send + Sync + Debug {
    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Validate the configuration is complete enough to send a request
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ConfigurationError`] if the API key is missing or
    /// the base URL is empty.
    fn validate(&self) -> ProbeResult<()> {
        if self.base_url().is_empty() {
            return Err(ProbeError::configuration_error(format!(
                "{} base URL is required",
                self.display_name()
            )));
        }
        match self.api_key() {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err(ProbeError::configuration_error(format!(
                "{} API key is required",
                self.display_name()
            ))),
        }
    }

    /// Human readable vendor name used in messages
    fn display_name(&self) -> &'static str;

    /// Get the base URL for API calls
    fn base_url(&self) -> &str;

    /// Get the API key if one was supplied
    fn api_key(&self) -> Option<&str>;

    /// Get the model name
    fn default_model(&self) -> &str;
}

/// Sampling overrides sent with a request. `None` leaves the provider default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl SamplingParams {
    /// The settings used for the plain chat providers
    pub fn chat_defaults() -> Self {
        Self {
            temperature: Some(0.7),
            max_tokens: Some(500),
        }
    }
}

/// OpenAI configuration (Responses API with web search)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
    /// System instruction sent ahead of the prompt
    pub instructions: String,
    /// Enable the hosted `web_search` tool
    pub enable_web_search: bool,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            default_model: "gpt-5-mini".to_string(),
            instructions: "You are a helpful assistant. Cite your sources when possible."
                .to_string(),
            enable_web_search: true,
        }
    }
}

impl OpenAIConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.default_model = model;
        }
        config
    }
}

impl ProviderConfig for OpenAIConfig {
    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn display_name(&self) -> &'static str {
        "OpenAI"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

/// Google Gemini configuration (generateContent API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            default_model: "gemini-2.5-flash".to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_key) = std::env::var("GOOGLE_API_KEY") {
            config.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.default_model = model;
        }
        config
    }
}

impl ProviderConfig for GeminiConfig {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Gemini"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

/// Mistral configuration (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
    pub params: SamplingParams,
}

impl Default for MistralConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.mistral.ai".to_string(),
            default_model: "mistral-medium-2508".to_string(),
            params: SamplingParams::chat_defaults(),
        }
    }
}

impl MistralConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_key) = std::env::var("MISTRAL_API_KEY") {
            config.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("MISTRAL_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("MISTRAL_MODEL") {
            config.default_model = model;
        }
        config
    }
}

impl ProviderConfig for MistralConfig {
    fn provider_name(&self) -> &'static str {
        "mistral"
    }

    fn display_name(&self) -> &'static str {
        "Mistral"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

/// Perplexity configuration (search-augmented chat completions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerplexityConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
    pub params: SamplingParams,
}

impl Default for PerplexityConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.perplexity.ai".to_string(),
            default_model: "sonar".to_string(),
            params: SamplingParams::chat_defaults(),
        }
    }
}

impl PerplexityConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_key) = std::env::var("PERPLEXITY_API_KEY") {
            config.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("PERPLEXITY_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("PERPLEXITY_MODEL") {
            config.default_model = model;
        }
        config
    }
}

impl ProviderConfig for PerplexityConfig {
    fn provider_name(&self) -> &'static str {
        "perplexity"
    }

    fn display_name(&self) -> &'static str {
        "Perplexity"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

/// Identifier for each supported provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Gemini,
    Mistral,
    Perplexity,
}

impl ProviderKind {
    /// Order used when no provider list is configured
    pub const DEFAULT_ORDER: [ProviderKind; 3] =
        [ProviderKind::OpenAI, ProviderKind::Gemini, ProviderKind::Mistral];

    /// Parse a comma separated provider list, keeping the given order
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ConfigurationError`] if any entry is unknown or
    /// the list is empty.
    pub fn parse_list(list: &str) -> ProbeResult<Vec<Self>> {
        let kinds = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Self::from_str)
            .collect::<ProbeResult<Vec<_>>>()?;

        if kinds.is_empty() {
            return Err(ProbeError::configuration_error(
                "Provider list must name at least one provider",
            ));
        }
        Ok(kinds)
    }
}

impl FromStr for ProviderKind {
    type Err = ProbeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "gemini" => Ok(Self::Gemini),
            "mistral" => Ok(Self::Mistral),
            "perplexity" => Ok(Self::Perplexity),
            _ => Err(ProbeError::configuration_error(format!(
                "Unsupported provider: {}. Supported providers: openai, gemini, mistral, perplexity",
                name
            ))),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAI => write!(f, "openai"),
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Mistral => write!(f, "mistral"),
            ProviderKind::Perplexity => write!(f, "perplexity"),
        }
    }
}

/// Credentials and endpoints for every provider
#[derive(Debug, Clone, Default)]
pub struct ProvidersConfig {
    pub openai: OpenAIConfig,
    pub gemini: GeminiConfig,
    pub mistral: MistralConfig,
    pub perplexity: PerplexityConfig,
}

impl ProvidersConfig {
    /// Load all provider configs from environment variables
    pub fn from_env() -> Self {
        let config = Self {
            openai: OpenAIConfig::from_env(),
            gemini: GeminiConfig::from_env(),
            mistral: MistralConfig::from_env(),
            perplexity: PerplexityConfig::from_env(),
        };

        log_debug!(
            openai_has_key = config.openai.api_key.is_some(),
            gemini_has_key = config.gemini.api_key.is_some(),
            mistral_has_key = config.mistral.api_key.is_some(),
            perplexity_has_key = config.perplexity.api_key.is_some(),
            "Provider configuration loaded from environment"
        );

        config
    }
}

/// Settings for one probe run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// JSON array of prompt strings
    pub prompts_path: PathBuf,
    /// How many times each prompt is sent to each provider
    pub iterations: u32,
    /// Destination CSV file
    pub output_path: PathBuf,
    /// Pause after every provider call
    pub call_delay: Duration,
    /// Case-insensitive term looked for in every answer
    pub marker_term: String,
    /// Providers to call, in call order
    pub providers: Vec<ProviderKind>,
    /// Per-request timeout; `None` keeps the HTTP client default
    pub request_timeout: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            prompts_path: PathBuf::from("config/prompts.json"),
            iterations: 2,
            output_path: PathBuf::from("data/test_results.csv"),
            call_delay: Duration::from_secs(1),
            marker_term: "alan".to_string(),
            providers: ProviderKind::DEFAULT_ORDER.to_vec(),
            request_timeout: None,
        }
    }
}

impl RunConfig {
    /// Load run settings from `PROBE_*` environment variables over the defaults
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ConfigurationError`] if a variable is set but
    /// cannot be parsed. The result is not validated; call
    /// [`RunConfig::validate`] once every override has been applied.
    pub fn from_env() -> ProbeResult<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("PROBE_PROMPTS") {
            config.prompts_path = PathBuf::from(path);
        }
        if let Some(iterations) = Self::parse_env::<u32>("PROBE_ITERATIONS")? {
            config.iterations = iterations;
        }
        if let Ok(path) = std::env::var("PROBE_OUTPUT") {
            config.output_path = PathBuf::from(path);
        }
        if let Some(delay_ms) = Self::parse_env::<u64>("PROBE_DELAY_MS")? {
            config.call_delay = Duration::from_millis(delay_ms);
        }
        if let Ok(marker) = std::env::var("PROBE_MARKER") {
            config.marker_term = marker;
        }
        if let Ok(list) = std::env::var("PROBE_PROVIDERS") {
            config.providers = ProviderKind::parse_list(&list)?;
        }
        if let Some(secs) = Self::parse_env::<u64>("PROBE_TIMEOUT_SECS")? {
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        log_debug!(
            prompts_path = %config.prompts_path.display(),
            iterations = config.iterations,
            output_path = %config.output_path.display(),
            call_delay_ms = config.call_delay.as_millis() as u64,
            provider_count = config.providers.len(),
            "Run configuration loaded"
        );

        Ok(config)
    }

    /// Validate run settings
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ConfigurationError`] if iterations is zero, the
    /// marker term is blank, or no provider is selected.
    pub fn validate(&self) -> ProbeResult<()> {
        if self.iterations == 0 {
            return Err(ProbeError::configuration_error(
                "Iterations must be a positive integer",
            ));
        }
        if self.marker_term.trim().is_empty() {
            return Err(ProbeError::configuration_error(
                "Marker term must not be empty",
            ));
        }
        if self.providers.is_empty() {
            return Err(ProbeError::configuration_error(
                "At least one provider must be selected",
            ));
        }
        Ok(())
    }

    fn parse_env<T: FromStr>(key: &str) -> ProbeResult<Option<T>> {
        match std::env::var(key) {
            Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
                ProbeError::configuration_error(format!("Invalid value for {key}: {raw}"))
            }),
            Err(_) => Ok(None),
        }
    }
}
