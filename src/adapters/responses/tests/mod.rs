//! Tests for the Responses adapter
//!
//! Normalizer behavior itself is covered in `src/tests/normalizer.rs`.


// NOTE: HTTP tests are in tests/responses_adapter_integration_tests.rs
