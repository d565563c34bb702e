//! Result records produced by one adapter call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Case-insensitive term searched for in every answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerTerm {
    term: String,
    folded: String,
}

impl MarkerTerm {
    pub fn new(term: impl Into<String>) -> Self {
        let term = term.into();
        let folded = term.to_lowercase();
        Self { term, folded }
    }

    pub fn as_str(&self) -> &str {
        &self.term
    }

    /// Whether the term occurs anywhere in `text`, ignoring case
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }
}

impl Default for MarkerTerm {
    fn default() -> Self {
        Self::new("alan")
    }
}

/// Record status as written to the `status` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success => write!(f, "success"),
            Status::Error => write!(f, "error"),
        }
    }
}

/// What came back from the provider. Exactly one of answer or error exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Success {
        answer: String,
        marker_mentioned: bool,
    },
    Error {
        message: String,
    },
}

/// One row of probe output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// `provider/model`, e.g. `openai/gpt-5-mini`
    pub provider: String,
    pub prompt: String,
    /// 1-based iteration number
    pub run_number: u32,
    pub timestamp: DateTime<Utc>,
    pub outcome: Outcome,
}

impl ResultRecord {
    /// Build a success record, deriving the marker flag from the answer
    pub fn success(
        provider: impl Into<String>,
        prompt: impl Into<String>,
        run_number: u32,
        answer: impl Into<String>,
        marker: &MarkerTerm,
    ) -> Self {
        let answer = answer.into();
        let marker_mentioned = marker.is_mentioned_in(&answer);
        Self {
            provider: provider.into(),
            prompt: prompt.into(),
            run_number,
            timestamp: Utc::now(),
            outcome: Outcome::Success {
                answer,
                marker_mentioned,
            },
        }
    }

    pub fn error(
        provider: impl Into<String>,
        prompt: impl Into<String>,
        run_number: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            prompt: prompt.into(),
            run_number,
            timestamp: Utc::now(),
            outcome: Outcome::Error {
                message: message.into(),
            },
        }
    }

    pub fn status(&self) -> Status {
        match self.outcome {
            Outcome::Success { .. } => Status::Success,
            Outcome::Error { .. } => Status::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == Status::Success
    }

    pub fn answer(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { answer, .. } => Some(answer),
            Outcome::Error { .. } => None,
        }
    }

    pub fn marker_mentioned(&self) -> Option<bool> {
        match self.outcome {
            Outcome::Success {
                marker_mentioned, ..
            } => Some(marker_mentioned),
            Outcome::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Error { message } => Some(message),
        }
    }
}
