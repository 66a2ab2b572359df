use crate::url::{is_resource_link, resolve_href};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Discovers the pages to analyze from the entry page's markup
///
/// # Discovery Rules
///
/// **Include:**
/// - The entry URL, always first
/// - `<a href="...">` targets on the entry page's origin, in document order
///
/// **Exclude:**
/// - Hrefs that are neither absolute `http(s)` URLs nor `/` or `./` relative
/// - Other origins (scheme, host and port must all match)
/// - Fragment links, `mailto:` and `tel:` links
/// - `.pdf`, `.jpg`, `.png` and `.gif` resources
///
/// Duplicates are dropped by full URL string and the result is truncated to
/// `max_pages` entries. If the entry URL cannot be parsed the failure is logged
/// and only the entry URL is returned.
///
/// # Example
///
/// ```
/// use site_story::url::discover_pages;
///
/// let html = r#"<a href="/about">About</a><a href="https://other.com/">Out</a>"#;
/// let pages = discover_pages("https://example.com/", html, 5);
/// assert_eq!(pages, vec!["https://example.com/", "https://example.com/about"]);
/// ```
pub fn discover_pages(entry_url: &str, html: &str, max_pages: usize) -> Vec<String> {
    let max_pages = max_pages.max(1);

    let entry = match Url::parse(entry_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Error discovering pages from {}: {}", entry_url, e);
            return vec![entry_url.to_string()];
        }
    };

    let mut pages = vec![entry_url.to_string()];
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(entry_url.to_string());
    seen.insert(entry.to_string());

    for href in extract_hrefs(html) {
        if pages.len() >= max_pages {
            break;
        }

        let Some(candidate) = resolve_href(&href, &entry) else {
            continue;
        };

        if candidate.origin() != entry.origin() {
            continue;
        }

        let candidate = candidate.to_string();
        if is_resource_link(&candidate) {
            continue;
        }

        if seen.insert(candidate.clone()) {
            pages.push(candidate);
        }
    }

    tracing::debug!("Discovered {} pages from {}", pages.len(), entry_url);
    pages
}

/// Extracts raw `href` values of anchor tags, in document order
fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    match Selector::parse("a[href]") {
        Ok(selector) => document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(|href| href.to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}
