//! Configuration module for Site-Story
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional: [`Config::default`] carries the stock crawl,
//! LLM and output settings.
//!
//! # Example
//!
//! ```no_run
//! use site_story::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-story.toml")).unwrap();
//! println!("Will analyze up to {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, LlmConfig, OutputConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{
    compute_config_hash, hash_config_content, load_config, load_config_with_hash, parse_config,
};
pub use validation::validate;
