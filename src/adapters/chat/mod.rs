//! OpenAI-compatible chat completions
//!
//! Used for Mistral and Perplexity. The answer is the first choice's message
//! content taken as is.

mod adapter;
pub mod types;

#[cfg(test)]
mod tests;

pub use adapter::ChatCompletionsAdapter;
pub use types::*;
