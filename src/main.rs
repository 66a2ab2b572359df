//! Site-Story main entry point
//!
//! This is the command-line interface for the Site-Story website analyzer.

use anyhow::{Context, Result};
use clap::Parser;
use site_story::config::{load_config_with_hash, validate, Config};
use site_story::output::{export_stories, print_report, save_acceptance_criteria, write_json_result};
use site_story::AnalysisResult;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Site-Story: turns a live website into user stories and test scenarios
///
/// Site-Story fetches the entry page and a few same-origin pages, detects
/// features such as login, search or checkout, and writes user stories with
/// acceptance criteria for them. With a Gemini API key the stories come from
/// the model; without one a basic navigation story is produced.
#[derive(Parser, Debug)]
#[command(name = "site-story")]
#[command(version = "1.0.0")]
#[command(about = "Website feature discovery and user-story generation", long_about = None)]
struct Cli {
    /// Entry URL of the site to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Gemini API key used for story generation
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Write a Gherkin feature file for every scenario
    #[arg(long)]
    export_gherkin: bool,

    /// Record the acceptance criteria after analysis
    #[arg(long)]
    save: bool,

    /// Write the full analysis result as JSON to this path
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be analyzed without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(cli.config.as_deref())?;

    url::Url::parse(&cli.url).with_context(|| format!("Invalid URL: {}", cli.url))?;

    if cli.dry_run {
        handle_dry_run(&config, &cli);
        return Ok(());
    }

    let result = site_story::analyze(&config, &cli.url, cli.api_key.as_deref())
        .await
        .inspect_err(|e| tracing::error!("Analysis failed: {}", e))
        .with_context(|| format!("Failed to analyze {}", cli.url))?;

    print_report(&result);

    handle_outputs(&config, &cli, &result).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_story=info,warn"),
            1 => EnvFilter::new("site_story=debug,info"),
            2 => EnvFilter::new("site_story=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if one was given, otherwise the defaults
fn load_effective_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        let config = Config::default();
        validate(&config)?;
        return Ok(config);
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .inspect_err(|e| tracing::error!("Failed to load configuration: {}", e))
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config, cli: &Cli) {
    println!("=== Site-Story Dry Run ===\n");

    println!("Target: {}", cli.url);

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nLLM Configuration:");
    println!("  Endpoint: {}", config.llm.endpoint);
    println!("  Model: {}", config.llm.model);
    println!("  Max attempts: {}", config.llm.max_attempts);
    println!("  Base delay: {}ms", config.llm.base_delay_ms);
    let key_state = match cli.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => "provided",
        _ => "not provided (basic navigation story)",
    };
    println!("  API key: {}", key_state);

    println!("\nOutput:");
    println!("  Gherkin directory: {}", config.output.gherkin_dir);
    println!("  Export Gherkin: {}", cli.export_gherkin);
    println!("  Save acceptance criteria: {}", cli.save);
    if let Some(json) = &cli.json {
        println!("  JSON result: {}", json.display());
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would analyze up to {} pages starting at {}",
        config.crawler.max_pages, cli.url
    );
}

/// Writes every requested artifact for a finished analysis
async fn handle_outputs(config: &Config, cli: &Cli, result: &AnalysisResult) -> Result<()> {
    if cli.export_gherkin {
        let dir = Path::new(&config.output.gherkin_dir);
        let summary = export_stories(dir, &result.user_stories, &result.site.url);
        println!(
            "\n✓ Exported {} feature files to {} ({} already existed)",
            summary.written.len(),
            dir.display(),
            summary.skipped.len()
        );
        for (path, reason) in &summary.failed {
            eprintln!("✗ Could not write {}: {}", path.display(), reason);
        }
    }

    if cli.save {
        save_acceptance_criteria(
            &result.user_stories,
            &result.site.url,
            Duration::from_millis(config.output.save_delay_ms),
        )
        .await
        .context("Failed to save acceptance criteria")?;
        println!("✓ Acceptance criteria saved");
    }

    if let Some(path) = &cli.json {
        write_json_result(result, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ Result written to {}", path.display());
    }

    Ok(())
}
