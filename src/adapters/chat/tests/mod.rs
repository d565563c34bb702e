//! Tests for the chat completions adapter
//!
//! Request building and answer extraction only.


// NOTE: HTTP tests are in tests/chat_adapter_integration_tests.rs
