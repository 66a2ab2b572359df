//! Integration tests for Site-Story
//!
//! These tests use wiremock to serve both the analyzed site and the
//! language model endpoint, and run the pipeline end-to-end.

mod analyze_tests;
mod common;
mod export_tests;
mod llm_tests;
