//! Error types for probe runs.
//!
//! [`ProbeError`] covers every failure mode of a run:
//! - Configuration errors (missing API keys, unreadable prompt file)
//! - Request failures (network issues, non-2xx provider responses)
//! - Rate limiting and timeouts
//! - Authentication failures
//! - Responses that cannot be decoded or carry no answer
//! - Failures writing the result file
//!
//! Adapters never let these escape: [`crate::adapters::invoke`] folds them
//! into an error [`ResultRecord`](crate::record::ResultRecord). Only the sink
//! and start-up configuration return them to the caller.
//!
//! # Example
//!
//! ```rust
//! use llm_probe::{ProbeError, ProbeResult};
//!
//! fn first_prompt(prompts: &[String]) -> ProbeResult<&str> {
//!     prompts
//!         .first()
//!         .map(String::as_str)
//!         .ok_or_else(|| ProbeError::configuration_error("No prompts configured"))
//! }
//! ```

use crate::logging::{log_error, log_warn};
use thiserror::Error;

/// Severity level for logging decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The run cannot produce its output.
    Critical,

    /// Action failed but the run continues.
    Error,

    /// Unexpected but recoverable situation.
    Warning,
}

/// Convenient result type for probe operations.
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

/// Errors that can occur while probing providers.
///
/// Use the constructor methods, which log the error at creation:
///
/// ```rust
/// use llm_probe::ProbeError;
///
/// let err = ProbeError::configuration_error("Mistral API key is required");
/// let err = ProbeError::rate_limit_exceeded(60);
/// let err = ProbeError::timeout(Some(30));
/// ```
///
/// | Variant | Severity |
/// |---------|----------|
/// | `ConfigurationError` | Error |
/// | `RequestFailed` | Error |
/// | `ResponseParsingError` | Warning |
/// | `EmptyAnswer` | Warning |
/// | `RateLimitExceeded` | Warning |
/// | `Timeout` | Warning |
/// | `AuthenticationFailed` | Error |
/// | `OutputFailed` | Critical |
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Configuration is invalid or incomplete.
    ///
    /// Common causes:
    /// - Missing API key for the provider being called
    /// - Prompt file missing, unreadable or containing empty prompts
    /// - Unknown provider name
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP request to the provider failed.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider answered, but the body could not be decoded.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },

    /// The provider answered without any extractable text.
    #[error("{provider} returned an empty answer")]
    EmptyAnswer {
        /// Identifier of the provider that answered.
        provider: String,
    },

    /// Provider rate limit exceeded.
    ///
    /// Runs never retry; the value is only reported.
    #[error("Rate limit exceeded, retry after {retry_after_seconds}s")]
    RateLimitExceeded {
        /// Wait time suggested by the provider.
        retry_after_seconds: u64,
    },

    /// Request timed out.
    #[error("Request timed out{}", timeout_suffix(.timeout_seconds))]
    Timeout {
        /// The configured timeout, if one was set.
        timeout_seconds: Option<u64>,
    },

    /// Authentication with the provider failed.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Details about the authentication failure.
        message: String,
    },

    /// Writing the result file failed.
    #[error("Failed to write results to {path}: {message}")]
    OutputFailed {
        /// Destination that could not be written.
        path: String,
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ProbeError {
    /// Get the error severity for logging.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::Error,
            Self::RequestFailed { .. } => ErrorSeverity::Error,
            Self::ResponseParsingError { .. } => ErrorSeverity::Warning,
            Self::EmptyAnswer { .. } => ErrorSeverity::Warning,
            Self::RateLimitExceeded { .. } => ErrorSeverity::Warning,
            Self::Timeout { .. } => ErrorSeverity::Warning,
            Self::AuthenticationFailed { .. } => ErrorSeverity::Error,
            Self::OutputFailed { .. } => ErrorSeverity::Critical,
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Probe configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "Provider request failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "Provider response format invalid"
        );
        Self::ResponseParsingError { message }
    }

    pub fn empty_answer(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        log_warn!(
            error_type = "empty_answer",
            provider = %provider,
            "Provider response contained no answer text"
        );
        Self::EmptyAnswer { provider }
    }

    pub fn rate_limit_exceeded(retry_after_seconds: u64) -> Self {
        log_warn!(
            error_type = "rate_limit_exceeded",
            retry_after_seconds = retry_after_seconds,
            "Provider rate limit exceeded"
        );
        Self::RateLimitExceeded {
            retry_after_seconds,
        }
    }

    pub fn timeout(timeout_seconds: Option<u64>) -> Self {
        log_warn!(
            error_type = "timeout",
            timeout_seconds = ?timeout_seconds,
            "Provider request timed out"
        );
        Self::Timeout { timeout_seconds }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "authentication_failed",
            message = %message,
            "Provider authentication failed"
        );
        Self::AuthenticationFailed { message }
    }

    pub fn output_failed(
        path: impl Into<String>,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let path = path.into();
        let message = message.into();
        log_error!(
            error_type = "output_failed",
            path = %path,
            message = %message,
            "Writing probe results failed"
        );
        Self::OutputFailed {
            path,
            message,
            source,
        }
    }
}

fn timeout_suffix(timeout_seconds: &Option<u64>) -> String {
    timeout_seconds
        .map(|secs| format!(" after {secs}s"))
        .unwrap_or_default()
}
