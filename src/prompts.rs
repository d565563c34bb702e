//! Prompt file loading
//!
//! The prompt file is a JSON array of strings, e.g.
//! `["What is the best health insurance for freelancers in France?"]`.

use crate::error::{ProbeError, ProbeResult};
use crate::logging::log_debug;
use std::path::Path;

/// Load the ordered prompt list from `path`
///
/// # Errors
///
/// Returns [`ProbeError::ConfigurationError`] if the file cannot be read, is
/// not a JSON array of strings, or contains a blank prompt.
pub fn load_prompts(path: &Path) -> ProbeResult<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ProbeError::configuration_error(format!(
            "Cannot read prompt file {}: {e}",
            path.display()
        ))
    })?;

    parse_prompts(&raw).map_err(|e| match e {
        ProbeError::ConfigurationError { message } => ProbeError::ConfigurationError {
            message: format!("{}: {message}", path.display()),
        },
        other => other,
    })
}

/// Parse a JSON array of non-blank prompt strings
pub fn parse_prompts(raw: &str) -> ProbeResult<Vec<String>> {
    let prompts: Vec<String> = serde_json::from_str(raw).map_err(|e| {
        ProbeError::configuration_error(format!("Prompt file must be a JSON array of strings: {e}"))
    })?;

    if let Some(position) = prompts.iter().position(|p| p.trim().is_empty()) {
        return Err(ProbeError::configuration_error(format!(
            "Prompt {} is empty",
            position + 1
        )));
    }

    log_debug!(prompt_count = prompts.len(), "Prompts loaded");

    Ok(prompts)
}
