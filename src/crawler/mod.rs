//! Crawler module for page fetching and feature extraction
//!
//! This module contains the crawl side of the pipeline, including:
//! - HTTP fetching with fail-soft page analysis
//! - Pattern-based feature detection
//! - Politeness throttling between sequential fetches
//! - Site-wide aggregation of page analyses

mod aggregator;
mod detector;
mod fetcher;
mod throttle;

pub use aggregator::{aggregate, infer_page_types, SiteAnalyzer};
pub use detector::{
    analyze_markup, count_elements, detect_features, detect_technologies, extract_content,
    Evidence, FeatureRule, CONTENT_LIMIT, FEATURE_RULES,
};
pub use fetcher::{analyze_page, build_http_client, fetch_markup};
pub use throttle::Throttle;

use crate::analysis::SiteAnalysis;
use crate::config::CrawlerConfig;
use crate::SiteStoryError;

/// Crawls and aggregates a site in one call
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `url` - The entry URL
///
/// # Returns
///
/// * `Ok(SiteAnalysis)` - Crawl completed
/// * `Err(SiteStoryError)` - The entry page could not be fetched
pub async fn crawl(config: &CrawlerConfig, url: &str) -> Result<SiteAnalysis, SiteStoryError> {
    SiteAnalyzer::new(config.clone())?.analyze_site(url).await
}
