// Test modules for llm-probe
//
// Each source file has a corresponding test file that focuses on business
// logic verification.

// Test helper utilities
pub mod helpers;

pub mod error;
pub mod prompts;
pub mod sink;

// NOTE: HTTP tests against mocked provider endpoints live in tests/
