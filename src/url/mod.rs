//! URL handling module for Site-Story
//!
//! This module provides href resolution against the entry page's origin and
//! same-site link discovery for the crawl frontier.

mod discover;

pub use discover::discover_pages;

use url::Url;

/// Path suffixes of resources that are never analyzed as pages
const RESOURCE_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".png", ".gif"];

/// Resolves an href found on the entry page to an absolute URL
///
/// Only absolute `http(s)` URLs and `/` or `./` paths are accepted; relative
/// paths resolve against the origin of `entry`, not its path.
///
/// # Returns
///
/// * `Some(Url)` - The absolute URL
/// * `None` - The href is unsupported or malformed
pub fn resolve_href(href: &str, entry: &Url) -> Option<Url> {
    let href = href.trim();

    if href.starts_with('/') || href.starts_with("./") {
        let origin = Url::parse(&entry.origin().ascii_serialization()).ok()?;
        return origin.join(href).ok();
    }

    if !href.starts_with("http") {
        return None;
    }

    let url = Url::parse(href).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

/// Returns true if the URL points at a fragment, a non-HTTP target or a binary resource
pub fn is_resource_link(url: &str) -> bool {
    if url.contains('#') || url.contains("mailto:") || url.contains("tel:") {
        return true;
    }

    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => url.to_lowercase(),
    };

    RESOURCE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
