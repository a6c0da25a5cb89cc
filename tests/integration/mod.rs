//! Integration Tests Module
//!
//! End-to-end tests that run the analysis engine against a mock explorer
//! backend.

pub mod engine_pipeline;
