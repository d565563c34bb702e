// Unit Tests for Probe Errors
//
// UNIT UNDER TEST: ProbeError
//
// BUSINESS RESPONSIBILITY:
//   - Produces the human readable text stored in error records
//   - Classifies errors by severity for logging
//
// TEST COVERAGE:
//   - Display text of every variant
//   - Severity mapping
//   - Timeout text with and without a configured limit
//   - Source chaining for wrapped errors

use crate::error::{ErrorSeverity, ProbeError};
use std::error::Error;

#[cfg(test)]
mod display_tests {
    use super::*;

    #[test]
    fn test_display_text_per_variant() {
        // Arrange
        let cases = vec![
            (
                ProbeError::configuration_error("Gemini API key is required"),
                "Configuration error: Gemini API key is required",
            ),
            (
                ProbeError::request_failed("connection refused", None),
                "Request failed: connection refused",
            ),
            (
                ProbeError::response_parsing_error("missing choices"),
                "Response parsing failed: missing choices",
            ),
            (
                ProbeError::empty_answer("mistral/mistral-medium-2508"),
                "mistral/mistral-medium-2508 returned an empty answer",
            ),
            (
                ProbeError::rate_limit_exceeded(30),
                "Rate limit exceeded, retry after 30s",
            ),
            (ProbeError::timeout(Some(10)), "Request timed out after 10s"),
            (ProbeError::timeout(None), "Request timed out"),
            (
                ProbeError::authentication_failed("OpenAI: invalid key"),
                "Authentication failed: OpenAI: invalid key",
            ),
            (
                ProbeError::output_failed("data/out.csv", "permission denied", None),
                "Failed to write results to data/out.csv: permission denied",
            ),
        ];

        for (error, expected) in cases {
            // Act & Assert
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_timeout_without_configured_limit_has_no_duration() {
        // Arrange
        let error = ProbeError::timeout(None);

        // Act
        let message = error.to_string();

        // Assert
        assert_eq!(message, "Request timed out");
        assert!(!message.contains("0s"));
    }

    #[test]
    fn test_wrapped_source_is_exposed() {
        // Arrange
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

        // Act
        let error = ProbeError::output_failed("out.csv", "cannot create file", Some(Box::new(io)));

        // Assert
        let source = error.source().expect("source should be kept");
        assert_eq!(source.to_string(), "denied");
    }
}

#[cfg(test)]
mod classification_tests {
    use super::*;

    #[test]
    fn test_severities() {
        assert_eq!(
            ProbeError::output_failed("p", "m", None).severity(),
            ErrorSeverity::Critical
        );
        assert_eq!(
            ProbeError::request_failed("x", None).severity(),
            ErrorSeverity::Error
        );
        assert_eq!(
            ProbeError::response_parsing_error("x").severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            ProbeError::empty_answer("x").severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(ProbeError::timeout(Some(5)).severity(), ErrorSeverity::Warning);
    }
}
