use serde::Deserialize;

/// User agent sent with every page fetch
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Site-Story
///
/// Every section is optional in the TOML file; missing sections and keys fall
/// back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub llm: LlmConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of pages analyzed per run, entry page included
    pub max_pages: usize,

    /// Delay between sequential page fetches (milliseconds)
    pub politeness_delay_ms: u64,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// User agent header for page fetches
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            politeness_delay_ms: 1000,
            request_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Language model configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LlmConfig {
    /// Base URL of the generative language API
    pub endpoint: String,

    /// Model name used for story generation
    pub model: String,

    /// Total attempts per generation, first call included
    pub max_attempts: u32,

    /// Base delay for backoff computation (milliseconds)
    pub base_delay_ms: u64,

    /// Upper bound of random jitter added to rate-limit backoff (milliseconds)
    pub rate_limit_jitter_ms: u64,

    /// Upper bound of random jitter added to overload backoff (milliseconds)
    pub overload_jitter_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            max_attempts: 4,
            base_delay_ms: 2000,
            rate_limit_jitter_ms: 1000,
            overload_jitter_ms: 2000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving exported feature files
    pub gherkin_dir: String,

    /// Simulated latency of the acceptance-criteria save (milliseconds)
    pub save_delay_ms: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            gherkin_dir: "gherkin-scenarios".to_string(),
            save_delay_ms: 1000,
        }
    }
}
