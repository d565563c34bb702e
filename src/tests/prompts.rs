// Unit Tests for Prompt Loading
//
// UNIT UNDER TEST: load_prompts, parse_prompts
//
// BUSINESS RESPONSIBILITY:
//   - Reads the ordered prompt list from a JSON array
//   - Refuses files that would make every call fail (bad JSON, blank prompts)
//
// TEST COVERAGE:
//   - Valid files keep their order
//   - Missing files, wrong shapes and blank entries

use crate::error::ProbeError;
use crate::prompts::{load_prompts, parse_prompts};
use tempfile::TempDir;

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order() {
        // Arrange
        let raw = r#"["First prompt", "Second prompt", "Third prompt"]"#;

        // Act
        let prompts = parse_prompts(raw).unwrap();

        // Assert
        assert_eq!(prompts, vec!["First prompt", "Second prompt", "Third prompt"]);
    }

    #[test]
    fn test_empty_array_is_allowed() {
        // Arrange & Act
        let prompts = parse_prompts("[]").unwrap();

        // Assert
        assert!(prompts.is_empty());
    }

    #[test]
    fn test_non_array_is_rejected() {
        for raw in [r#"{"prompts": ["a"]}"#, r#"[1, 2]"#, "not json"] {
            // Act
            let result = parse_prompts(raw);

            // Assert
            assert!(
                matches!(result, Err(ProbeError::ConfigurationError { .. })),
                "input: {raw}"
            );
        }
    }

    #[test]
    fn test_blank_prompt_is_rejected_with_position() {
        // Arrange
        let raw = r#"["fine", "   "]"#;

        // Act
        let error = parse_prompts(raw).unwrap_err();

        // Assert
        assert!(error.to_string().contains("Prompt 2 is empty"));
    }
}

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompts.json");
        std::fs::write(
            &path,
            r#"["What is the best health insurance for freelancers in France?"]"#,
        )
        .unwrap();

        // Act
        let prompts = load_prompts(&path).unwrap();

        // Assert
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("freelancers"));
    }

    #[test]
    fn test_missing_file_is_a_configuration_error() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        // Act
        let error = load_prompts(&path).unwrap_err();

        // Assert
        assert!(matches!(error, ProbeError::ConfigurationError { .. }));
        assert!(error.to_string().contains("Cannot read prompt file"));
    }

    #[test]
    fn test_file_errors_name_the_file() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"[""]"#).unwrap();

        // Act
        let error = load_prompts(&path).unwrap_err();

        // Assert
        let message = error.to_string();
        assert!(message.contains("broken.json"));
        assert!(message.contains("Prompt 1 is empty"));
    }
}
