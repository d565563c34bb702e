//! Flattens Responses-API output into a single answer string.
//!
//! A response may carry its answer as a top-level `output_text` string or
//! spread over `output[].content[]` fragments. Textual fragments can hold
//! citation annotations, which are deduplicated and appended to the answer as
//! a Markdown table.
//!
//! The response shape differs between API versions, so every lookup is an
//! optional step over [`serde_json::Value`]. A missing or wrongly-typed piece
//! contributes nothing instead of failing the whole answer.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt::Write;

const TEXT_FRAGMENT_TYPE: &str = "output_text";
const TABLE_HEADER: &str = "| # | Type | Title/Quote | URL / File ID |";
const TABLE_SEPARATOR: &str = "|---:|------|-------------|----------------|";

/// A source reference attached to part of an answer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Citation {
    Web {
        url: String,
        title: Option<String>,
    },
    File {
        file_id: String,
        quote: Option<String>,
    },
}

impl Citation {
    fn kind_label(&self) -> &'static str {
        match self {
            Citation::Web { .. } => "web",
            Citation::File { .. } => "file",
        }
    }
}

/// Answer text and citations pulled out of one response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedResponse {
    /// Convenience text, or the joined text fragments
    pub text: String,
    /// Unique citations in order of first appearance
    pub citations: Vec<Citation>,
}

impl NormalizedResponse {
    /// The answer with the citation table appended when there are citations
    pub fn render(&self) -> String {
        if self.citations.is_empty() {
            return self.text.clone();
        }

        let mut answer = self.text.clone();
        answer.push_str("\n\nCitations:\n\n");
        answer.push_str(TABLE_HEADER);
        answer.push('\n');
        answer.push_str(TABLE_SEPARATOR);

        for (index, citation) in self.citations.iter().enumerate() {
            let (label, target) = match citation {
                Citation::Web { url, title } => (title.as_deref().unwrap_or(""), url.as_str()),
                Citation::File { file_id, quote } => {
                    (quote.as_deref().unwrap_or(""), file_id.as_str())
                }
            };
            // Writing into a String cannot fail
            let _ = write!(
                answer,
                "\n| {} | {} | {} | {} |",
                index + 1,
                citation.kind_label(),
                escape_cell(label),
                escape_cell(target)
            );
        }

        answer
    }
}

/// Response normalizer for structured, citation-bearing responses
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Flatten a response into the final answer string
    pub fn normalize(response: &Value) -> String {
        Self::extract(response).render()
    }

    /// Pull answer text and citations out of a response without rendering
    pub fn extract(response: &Value) -> NormalizedResponse {
        let text = match non_empty_str(response.get("output_text")) {
            Some(convenience) => convenience.to_string(),
            None => Self::collect_text_fragments(response).join("\n"),
        };

        NormalizedResponse {
            text,
            citations: Self::collect_citations(response),
        }
    }

    /// Text of every textual fragment, in output order
    pub fn collect_text_fragments(response: &Value) -> Vec<String> {
        text_fragments(response)
            .filter_map(fragment_text)
            .map(str::to_string)
            .collect()
    }

    /// Unique citations from every textual fragment, first occurrence wins
    pub fn collect_citations(response: &Value) -> Vec<Citation> {
        let mut seen = HashSet::new();
        let mut citations = Vec::new();

        for citation in text_fragments(response)
            .flat_map(fragment_annotations)
            .filter_map(citation_from_annotation)
        {
            if seen.insert(citation.clone()) {
                citations.push(citation);
            }
        }

        citations
    }
}

/// Content fragments whose declared type marks them as text output
fn text_fragments(response: &Value) -> impl Iterator<Item = &Value> {
    response
        .get("output")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|fragment| fragment.get("type").and_then(Value::as_str) == Some(TEXT_FRAGMENT_TYPE))
}

/// `text` is either a plain string or an object with `value` / `content`
fn fragment_text(fragment: &Value) -> Option<&str> {
    match fragment.get("text")? {
        Value::String(text) => Some(text.as_str()).filter(|t| !t.is_empty()),
        text @ Value::Object(_) => {
            non_empty_str(text.get("value")).or_else(|| non_empty_str(text.get("content")))
        }
        _ => None,
    }
}

/// Annotations live under `text.annotations` or directly on the fragment
fn fragment_annotations(fragment: &Value) -> impl Iterator<Item = &Value> {
    let nested = fragment
        .get("text")
        .and_then(|text| text.get("annotations"))
        .and_then(Value::as_array);
    let flat = fragment.get("annotations").and_then(Value::as_array);

    nested.into_iter().chain(flat).flatten()
}

fn citation_from_annotation(annotation: &Value) -> Option<Citation> {
    match annotation.get("type").and_then(Value::as_str)? {
        kind @ ("web_citation" | "url_citation") => {
            let url = annotation_field(annotation, kind, "url")?;
            Some(Citation::Web {
                url: url.to_string(),
                title: optional_field(annotation, kind, "title").map(str::to_string),
            })
        }
        kind @ "file_citation" => {
            let file_id = annotation_field(annotation, kind, "file_id")?;
            Some(Citation::File {
                file_id: file_id.to_string(),
                quote: optional_field(annotation, kind, "quote").map(str::to_string),
            })
        }
        _ => None,
    }
}

/// Look up `name` under the object named after the annotation kind, then flat
fn annotation_field<'a>(annotation: &'a Value, kind: &str, name: &str) -> Option<&'a str> {
    non_empty_str(annotation.get(kind).and_then(|nested| nested.get(name)))
        .or_else(|| non_empty_str(annotation.get(name)))
}

/// Like [`annotation_field`], but an empty string is kept as a value
fn optional_field<'a>(annotation: &'a Value, kind: &str, name: &str) -> Option<&'a str> {
    annotation
        .get(kind)
        .and_then(|nested| nested.get(name))
        .and_then(Value::as_str)
        .or_else(|| annotation.get(name).and_then(Value::as_str))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Pipes and line breaks would split a table row
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}
