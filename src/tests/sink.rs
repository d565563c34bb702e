// Unit Tests for the CSV Result Sink
//
// UNIT UNDER TEST: CsvSink
//
// BUSINESS RESPONSIBILITY:
//   - Writes a header and one row per record in a fixed column order
//   - Leaves fields a record does not have empty
//   - Quotes answers containing commas, quotes and newlines
//   - Writes nothing at all for an empty run
//
// TEST COVERAGE:
//   - Header and row layout
//   - Success and error rows
//   - Directory creation and unwritable destinations

use crate::error::ProbeError;
use crate::record::{MarkerTerm, ResultRecord};
use crate::sink::{CsvSink, COLUMNS};
use crate::tests::helpers::{error_record, success_record};
use chrono::DateTime;
use tempfile::TempDir;

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("output should be readable");
    let header = reader
        .headers()
        .expect("header row")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|row| row.expect("valid row").iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

#[cfg(test)]
mod layout_tests {
    use super::*;

    #[test]
    fn test_header_matches_column_order() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");

        // Act
        CsvSink::write(&[success_record("openai/gpt-5-mini", "ok")], &path).unwrap();

        // Assert
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().next(), Some(COLUMNS.join(",").as_str()));
        assert_eq!(
            COLUMNS.join(","),
            "provider,prompt,marker_mentioned,response,run_number,timestamp,status,error"
        );
    }

    #[test]
    fn test_success_and_error_rows() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        let mut success = ResultRecord::success(
            "openai/gpt-5-mini",
            "Which insurer?",
            1,
            "Alan is popular.",
            &MarkerTerm::default(),
        );
        success.timestamp = DateTime::parse_from_rfc3339("2026-01-02T03:04:05.123456Z")
            .unwrap()
            .into();
        let failure = ResultRecord::error(
            "gemini/gemini-2.5-flash",
            "Which insurer?",
            1,
            "Request timed out after 30s",
        );

        // Act
        CsvSink::write(&[success, failure], &path).unwrap();

        // Assert
        let (header, rows) = read_rows(&path);
        assert_eq!(header, COLUMNS.to_vec());
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            vec![
                "openai/gpt-5-mini",
                "Which insurer?",
                "true",
                "Alan is popular.",
                "1",
                "2026-01-02T03:04:05.123456Z",
                "success",
                "",
            ]
        );
        assert_eq!(rows[1][0], "gemini/gemini-2.5-flash");
        assert_eq!(rows[1][2], "");
        assert_eq!(rows[1][3], "");
        assert_eq!(rows[1][6], "error");
        assert_eq!(rows[1][7], "Request timed out after 30s");
    }

    #[test]
    fn test_answers_with_separators_survive() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        let answer = "Line one, with comma.\n\n| 1 | web | \"Quoted\" | https://x.test |";

        // Act
        CsvSink::write(&[success_record("openai/gpt-5-mini", answer)], &path).unwrap();

        // Assert
        let (_, rows) = read_rows(&path);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][3], answer);
    }

    #[test]
    fn test_existing_file_is_replaced() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "old,content\n1,2\n3,4\n").unwrap();

        // Act
        CsvSink::write(&[error_record("mistral/mistral-medium-2508", "down")], &path).unwrap();

        // Assert
        let (header, rows) = read_rows(&path);
        assert_eq!(header, COLUMNS.to_vec());
        assert_eq!(rows.len(), 1);
    }
}

#[cfg(test)]
mod destination_tests {
    use super::*;

    #[test]
    fn test_no_records_writes_no_file() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");

        // Act
        let result = CsvSink::write(&[], &path);

        // Assert
        assert!(result.is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_parent_directories_are_created() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("nested").join("results.csv");

        // Act
        CsvSink::write(&[success_record("perplexity/sonar", "ok")], &path).unwrap();

        // Assert
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_destination_reports_output_failure() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "file in the way").unwrap();
        let path = blocker.join("results.csv");

        // Act
        let result = CsvSink::write(&[success_record("openai/gpt-5-mini", "ok")], &path);

        // Assert
        match result {
            Err(ProbeError::OutputFailed { path: reported, .. }) => {
                assert!(reported.ends_with("results.csv"));
            }
            other => panic!("Expected OutputFailed, got {:?}", other),
        }
    }
}
