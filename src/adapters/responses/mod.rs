//! OpenAI Responses API with the hosted web search tool
//!
//! The only adapter whose answers may carry citations; the raw response is
//! flattened by [`crate::normalizer::ResponseNormalizer`].

mod adapter;
pub mod types;

#[cfg(test)]
mod tests;

pub use adapter::ResponsesAdapter;
pub use types::{InputMessage, ResponsesRequest, ResponsesTool};
