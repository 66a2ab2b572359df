//! Site-Story: website feature discovery and user-story generation
//!
//! This crate crawls a handful of same-origin pages from an entry URL, detects
//! UI/content features with pattern heuristics, and turns the aggregated evidence
//! into user stories with acceptance criteria and test scenarios, either from a
//! fixed template or by prompting an LLM.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod narrative;
pub mod output;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Story operations
#[derive(Debug, Error)]
pub enum SiteStoryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Failed to load entry page {url}: {source}")]
    EntryPage {
        url: String,
        source: Box<SiteStoryError>,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Llm(#[from] LlmError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while generating stories with a language model
///
/// Each variant is one error class of the retry policy; see
/// [`narrative::RetryPolicy`] for which classes are retried.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("An LLM API key is required")]
    MissingCredential,

    #[error("Invalid LLM API key. Please check your API key and try again. ({0})")]
    InvalidCredential(String),

    #[error("LLM API quota exceeded. Please check your usage limits. ({0})")]
    QuotaExceeded(String),

    #[error("LLM API rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("LLM model overloaded: {0}")]
    Overloaded(String),

    #[error("LLM server or network error: {0}")]
    Transient(String),

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("LLM request failed: {0}")]
    Other(String),

    #[error("{} (gave up after {attempts} attempts; last error: {last})", exhausted_message(.last))]
    Exhausted { attempts: u32, last: Box<LlmError> },
}

fn exhausted_message(last: &LlmError) -> &'static str {
    match last {
        LlmError::RateLimited(_) => {
            "LLM API rate limit exceeded after multiple retries. Please wait a few minutes and try again."
        }
        LlmError::Overloaded(_) => {
            "LLM model is currently overloaded after multiple retries. Please try again in a few minutes."
        }
        LlmError::Transient(_) => {
            "LLM API server error after multiple retries. Please try again later."
        }
        LlmError::MalformedResponse(_) => {
            "LLM kept returning unparseable user stories after multiple retries."
        }
        _ => "Failed to generate user stories after multiple retries. Please check your API key and try again.",
    }
}

/// Result type alias for Site-Story operations
pub type Result<T> = std::result::Result<T, SiteStoryError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for language model operations
pub type LlmResult<T> = std::result::Result<T, LlmError>;

// Re-export commonly used types
pub use analysis::{AnalysisResult, PageAnalysis, SiteAnalysis, UserStory};
pub use config::Config;
pub use pipeline::{analyze, analyze_with_model};
