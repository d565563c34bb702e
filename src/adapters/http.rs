//! Shared JSON-over-HTTP client for all provider adapters.
//!
//! Sends exactly one request per call. Non-2xx answers are mapped onto
//! [`ProbeError`] variants; nothing is retried.

use crate::error::{ProbeError, ProbeResult};
use crate::logging::{log_debug, log_error};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

/// HTTP client shared by every adapter of a run
#[derive(Debug, Clone)]
pub struct JsonHttpClient {
    client: reqwest::Client,
    request_timeout: Option<Duration>,
}

impl Default for JsonHttpClient {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            request_timeout: None,
        }
    }
}

impl JsonHttpClient {
    /// Create a client, optionally bounding each request
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ConfigurationError`] if the underlying HTTP
    /// client cannot be built.
    pub fn new(request_timeout: Option<Duration>) -> ProbeResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ProbeError::configuration_error(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            request_timeout,
        })
    }

    /// Headers for APIs that take `Authorization: Bearer <key>`
    pub fn bearer_headers(api_key: &str) -> ProbeResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                ProbeError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );

        Ok(headers)
    }

    /// Headers for APIs that take the key in a named header
    pub fn api_key_headers(header_name: &'static str, api_key: &str) -> ProbeResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(header_name),
            HeaderValue::from_str(api_key).map_err(|e| {
                ProbeError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );

        Ok(headers)
    }

    /// POST `body` as JSON and decode the JSON answer
    pub async fn post_json<B, R>(
        &self,
        provider: &str,
        url: &str,
        headers: &HeaderMap,
        body: &B,
    ) -> ProbeResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let start_time = Instant::now();
        let response = self
            .client
            .post(url)
            .headers(headers.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(provider, url, e))?;

        log_debug!(
            provider = %provider,
            status = %response.status(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Provider responded"
        );

        if !response.status().is_success() {
            return Err(handle_error_response(provider, response).await);
        }

        parse_success_response(provider, response).await
    }

    fn map_send_error(&self, provider: &str, url: &str, error: reqwest::Error) -> ProbeError {
        log_error!(
            provider = %provider,
            url = %url,
            error = %error,
            "HTTP request failed"
        );

        if error.is_timeout() {
            return ProbeError::timeout(self.request_timeout.map(|t| t.as_secs()));
        }

        ProbeError::request_failed(
            format!("{provider} request failed: {error}"),
            Some(Box::new(error)),
        )
    }
}

/// Pull `error.message` out of a JSON error body, if there is one
fn error_detail(error_text: &str) -> Option<String> {
    let error_json = serde_json::from_str::<serde_json::Value>(error_text).ok()?;
    let error_obj = error_json.get("error")?;
    error_obj
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| error_obj.as_str())
        .map(str::to_string)
}

/// Handle non-success HTTP responses
async fn handle_error_response(provider: &str, response: reqwest::Response) -> ProbeError {
    let status = response.status();
    let headers = response.headers().clone();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    log_error!(
        provider = %provider,
        status = %status,
        error_text = %error_text,
        "API error response"
    );

    match status.as_u16() {
        401 | 403 => {
            let detail = error_detail(&error_text).unwrap_or_else(|| status.to_string());
            ProbeError::authentication_failed(format!("{provider}: {detail}"))
        }
        429 => {
            let retry_after_seconds = headers
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            ProbeError::rate_limit_exceeded(retry_after_seconds)
        }
        _ => ProbeError::request_failed(
            format!("{provider} API error {status}: {error_text}"),
            None,
        ),
    }
}

/// Parse a successful HTTP response body
async fn parse_success_response<R: DeserializeOwned>(
    provider: &str,
    response: reqwest::Response,
) -> ProbeResult<R> {
    let raw_body = response.text().await.map_err(|e| {
        log_error!(
            provider = %provider,
            error = %e,
            "Failed to read response body"
        );
        ProbeError::response_parsing_error(format!("Failed to read {provider} response: {e}"))
    })?;

    serde_json::from_str(&raw_body).map_err(|e| {
        log_error!(
            provider = %provider,
            error = %e,
            raw_body = %raw_body,
            "Failed to parse response"
        );
        ProbeError::response_parsing_error(format!("Invalid {provider} response: {e}"))
    })
}
