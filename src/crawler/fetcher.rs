//! HTTP fetcher implementation
//!
//! This module handles all page requests for the analyzer:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests returning raw markup
//! - Error classification (status, timeout, transport)
//! - The fail-soft page analysis used for every non-entry page

use crate::analysis::PageAnalysis;
use crate::config::CrawlerConfig;
use crate::crawler::detector::analyze_markup;
use crate::SiteStoryError;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_story::config::CrawlerConfig;
/// use site_story::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the raw markup of a URL
///
/// # Error Classification
///
/// | Condition | Error |
/// |-----------|-------|
/// | Non-2xx status | `HttpStatus` |
/// | Timeout | `Timeout` |
/// | DNS, connect, TLS, body decode | `Http` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_markup(client: &Client, url: &str) -> Result<String, SiteStoryError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_transport_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SiteStoryError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| classify_transport_error(url, e))
}

fn classify_transport_error(url: &str, error: reqwest::Error) -> SiteStoryError {
    if error.is_timeout() {
        SiteStoryError::Timeout {
            url: url.to_string(),
        }
    } else {
        SiteStoryError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Fetches and analyzes one page without ever failing
///
/// Any fetch failure is logged and replaced by [`PageAnalysis::failed`], so a
/// broken page never aborts the crawl.
pub async fn analyze_page(client: &Client, url: &str) -> PageAnalysis {
    tracing::debug!("Analyzing page: {}", url);

    match fetch_markup(client, url).await {
        Ok(html) => {
            let page = analyze_markup(url, &html);
            tracing::debug!(
                "{}: \"{}\" ({} forms, {} links, {} images)",
                url,
                page.title,
                page.counts.forms,
                page.counts.links,
                page.counts.images
            );
            page
        }
        Err(e) => {
            tracing::warn!("Error analyzing {}: {}", url, e);
            PageAnalysis::failed(url)
        }
    }
}
