//! Site aggregator - crawl orchestration for one analysis run
//!
//! This module drives a single run:
//! - Fetching the entry page (the only fatal fetch)
//! - Discovering same-origin pages from its markup
//! - Analyzing discovered pages sequentially behind the politeness throttle
//! - Merging the page analyses into one `SiteAnalysis`

use crate::analysis::{
    push_unique, DetectedFeatures, NavigationStructure, PageAnalysis, SiteAnalysis, SiteStructure,
};
use crate::config::CrawlerConfig;
use crate::crawler::detector::{analyze_markup, merge_navigation};
use crate::crawler::fetcher::{analyze_page, build_http_client, fetch_markup};
use crate::crawler::throttle::Throttle;
use crate::url::discover_pages;
use crate::SiteStoryError;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Crawls one site and aggregates what it finds
pub struct SiteAnalyzer {
    config: CrawlerConfig,
    client: Client,
}

impl SiteAnalyzer {
    /// Creates a new analyzer instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(SiteAnalyzer)` - Successfully created analyzer
    /// * `Err(SiteStoryError)` - Failed to build the HTTP client
    pub fn new(config: CrawlerConfig) -> Result<Self, SiteStoryError> {
        let client = build_http_client(&config)?;
        Ok(Self { config, client })
    }

    /// Runs a full crawl starting at `url`
    ///
    /// 1. Fetch the entry page; failure aborts the run
    /// 2. Analyze the entry markup and reuse it for link discovery
    /// 3. Discover up to `max_pages` same-origin URLs
    /// 4. Analyze every other discovered URL in order, one at a time,
    ///    separated by the politeness delay; failures yield placeholder pages
    /// 5. Aggregate everything with the entry page first
    pub async fn analyze_site(&self, url: &str) -> Result<SiteAnalysis, SiteStoryError> {
        tracing::info!("Starting site analysis of: {}", url);
        let start_time = Instant::now();

        let mut throttle = Throttle::new(Duration::from_millis(self.config.politeness_delay_ms));

        throttle.wait().await;
        let entry_html = fetch_markup(&self.client, url).await.map_err(|e| {
            tracing::error!("Failed to fetch entry page {}: {}", url, e);
            SiteStoryError::EntryPage {
                url: url.to_string(),
                source: Box::new(e),
            }
        })?;
        let entry_page = analyze_markup(url, &entry_html);

        let test_urls = discover_pages(url, &entry_html, self.config.max_pages);
        tracing::info!(
            "Discovered {} pages to analyze: {:?}",
            test_urls.len(),
            test_urls
        );

        let mut pages = vec![entry_page];
        for page_url in test_urls.iter().filter(|u| u.as_str() != url) {
            throttle.wait().await;
            pages.push(analyze_page(&self.client, page_url).await);
        }

        let analysis = aggregate(url, &entry_html, pages, test_urls);

        tracing::info!(
            "Analysis of {} completed: {} pages in {:?}",
            url,
            analysis.pages_crawled,
            start_time.elapsed()
        );

        Ok(analysis)
    }
}

/// Merges page analyses into a site analysis
///
/// `pages` must hold the entry page first. Site-level cookie consent and
/// breadcrumbs are read from the entry markup directly.
pub fn aggregate(
    url: &str,
    entry_html: &str,
    pages: Vec<PageAnalysis>,
    test_urls: Vec<String>,
) -> SiteAnalysis {
    let entry_lower = entry_html.to_lowercase();

    let mut site_structure = SiteStructure::default();
    let mut technologies = Vec::new();
    for page in &pages {
        site_structure.add(&page.counts);
        for tech in &page.technologies {
            push_unique(&mut technologies, tech);
        }
    }

    let any = |flag: fn(&PageAnalysis) -> bool| pages.iter().any(flag);
    let detected_features = DetectedFeatures {
        has_login: any(|p| p.features.has_login),
        has_search: any(|p| p.features.has_search),
        has_ecommerce: any(|p| p.features.has_ecommerce),
        has_contact_form: any(|p| p.features.has_contact_form),
        has_newsletter: any(|p| p.features.has_newsletter),
        has_chatbot: any(|p| p.features.has_chatbot),
        has_file_upload: any(|p| p.features.has_file_upload),
        has_payment_form: any(|p| p.features.has_payment_form),
        has_user_dashboard: false,
        has_multi_language: false,
        has_cookie_consent: entry_lower.contains("cookie"),
        has_video_content: any(|p| p.features.has_video_content),
        has_image_gallery: any(|p| p.features.has_image_gallery),
        has_social_login: any(|p| p.features.has_social_login),
        has_comments: any(|p| p.features.has_comments),
    };

    let navigation_structure = NavigationStructure {
        main_menu_items: merge_navigation(&pages),
        footer_links: Vec::new(),
        breadcrumbs: entry_lower.contains("breadcrumb"),
    };

    SiteAnalysis {
        url: url.to_string(),
        pages_crawled: pages.len(),
        page_types: infer_page_types(url, &pages),
        pages,
        site_structure,
        technologies,
        detected_features,
        navigation_structure,
        test_urls,
    }
}

/// Labels the kinds of pages seen during the crawl, in first-seen order
pub fn infer_page_types(url: &str, pages: &[PageAnalysis]) -> Vec<String> {
    let mut page_types = Vec::new();

    for page in pages {
        let title = page.title.to_lowercase();

        if page.url == url {
            push_unique(&mut page_types, "Homepage");
        }
        if page.features.has_contact_form {
            push_unique(&mut page_types, "Contact Page");
        }
        if page.features.has_ecommerce {
            push_unique(&mut page_types, "Product/Shop Page");
        }
        if title.contains("about") {
            push_unique(&mut page_types, "About Page");
        }
        if title.contains("service") {
            push_unique(&mut page_types, "Services Page");
        }
        if title.contains("blog") {
            push_unique(&mut page_types, "Blog Page");
        }
        if page.features.has_image_gallery {
            push_unique(&mut page_types, "Gallery Page");
        }
    }

    page_types
}
