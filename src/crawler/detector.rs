//! Heuristic feature detection
//!
//! Markup is treated as raw text: counts and feature flags come from regular
//! expressions, not from a DOM. Title and navigation text are read with
//! `scraper` since they need element boundaries.
//!
//! Feature flags are driven by [`FEATURE_RULES`], a table mapping each
//! [`Feature`] to a pattern plus an optional co-occurrence requirement. Adding a
//! detector means adding a row.

use crate::analysis::{push_unique, ElementCounts, Feature, PageAnalysis, PageFeatures, UNTITLED_PAGE};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Maximum number of characters of text content kept per page
pub const CONTENT_LIMIT: usize = 1000;

/// Images required before gallery keywords count as a gallery
const GALLERY_MIN_IMAGES: u32 = 5;

/// Technology name and the lowercase substrings that reveal it
const TECHNOLOGIES: &[(&str, &[&str])] = &[
    ("React", &["react"]),
    ("Next.js", &["next.js", "nextjs"]),
    ("Vue.js", &["vue"]),
    ("Angular", &["angular"]),
    ("jQuery", &["jquery"]),
    ("Bootstrap", &["bootstrap"]),
    ("Tailwind CSS", &["tailwind"]),
    ("WordPress", &["wordpress"]),
];

/// Extra evidence a rule needs beyond its pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    /// Pattern alone decides
    None,
    /// Markup must also mention a password, username or email field
    CredentialField,
    /// Page must contain at least one form
    AnyForm,
    /// Page must contain more than this many images
    ImagesOver(u32),
}

/// One row of the detection table
#[derive(Debug)]
pub struct FeatureRule {
    pub feature: Feature,
    pub pattern: Regex,
    pub evidence: Evidence,
}

impl FeatureRule {
    fn new(feature: Feature, pattern: &str, evidence: Evidence) -> Self {
        Self {
            feature,
            // Patterns are compile-time constants covered by the tests below
            pattern: Regex::new(&format!("(?i){}", pattern)).expect("invalid feature pattern"),
            evidence,
        }
    }

    /// Evaluates the rule against raw markup and the page's element counts
    pub fn matches(&self, html: &str, counts: &ElementCounts) -> bool {
        if !self.pattern.is_match(html) {
            return false;
        }

        match self.evidence {
            Evidence::None => true,
            Evidence::CredentialField => {
                let lower = html.to_lowercase();
                ["password", "username", "email"]
                    .iter()
                    .any(|field| lower.contains(field))
            }
            Evidence::AnyForm => counts.forms > 0,
            Evidence::ImagesOver(n) => counts.images > n,
        }
    }
}

/// The detection table, one rule per page-level feature
pub static FEATURE_RULES: LazyLock<Vec<FeatureRule>> = LazyLock::new(|| {
    vec![
        FeatureRule::new(
            Feature::Login,
            r"login|sign\s*in|log\s*in|signin|authentication|auth",
            Evidence::CredentialField,
        ),
        FeatureRule::new(
            Feature::Search,
            r#"search|<input[^>]*type=["']search|<input[^>]*placeholder[^>]*search"#,
            Evidence::None,
        ),
        FeatureRule::new(
            Feature::ContactForm,
            r"contact.*form|form.*contact|<form[^>]*contact|name.*email.*message",
            Evidence::AnyForm,
        ),
        FeatureRule::new(
            Feature::Newsletter,
            r"newsletter|subscribe|signup.*email|email.*signup",
            Evidence::None,
        ),
        FeatureRule::new(
            Feature::Chatbot,
            r"chat|bot|support.*chat|live.*chat|intercom|zendesk",
            Evidence::None,
        ),
        FeatureRule::new(
            Feature::FileUpload,
            r#"<input[^>]*type=["']file"#,
            Evidence::None,
        ),
        FeatureRule::new(
            Feature::PaymentForm,
            r"payment|checkout|credit.*card|paypal|stripe|billing",
            Evidence::None,
        ),
        FeatureRule::new(
            Feature::Ecommerce,
            r"shop|store|cart|product|buy|purchase|price|\$\d+|add.*to.*cart",
            Evidence::None,
        ),
        FeatureRule::new(
            Feature::VideoContent,
            r"<video|youtube|vimeo|embed.*video",
            Evidence::None,
        ),
        FeatureRule::new(
            Feature::ImageGallery,
            r"gallery|portfolio|<img[^>]*gallery|lightbox",
            Evidence::ImagesOver(GALLERY_MIN_IMAGES),
        ),
        FeatureRule::new(
            Feature::SocialLogin,
            r"facebook.*login|google.*login|twitter.*login|github.*login|oauth",
            Evidence::None,
        ),
        FeatureRule::new(
            Feature::Comments,
            r"comment|reply|discussion|disqus",
            Evidence::None,
        ),
        FeatureRule::new(Feature::CookieConsent, r"cookie", Evidence::None),
    ]
});

static FORM_TAG: LazyLock<Regex> = LazyLock::new(|| tag_regex(r"<form[^>]*>"));
static LINK_TAG: LazyLock<Regex> = LazyLock::new(|| tag_regex(r"<a[^>]*href"));
static IMG_TAG: LazyLock<Regex> = LazyLock::new(|| tag_regex(r"<img[^>]*>"));
static INTERACTIVE_TAGS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        tag_regex(r"<button[^>]*>"),
        tag_regex(r"<input[^>]*>"),
        tag_regex(r"<select[^>]*>"),
        tag_regex(r"<textarea[^>]*>"),
    ]
});
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| tag_regex(r"<[^>]*>"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| tag_regex(r"\s+"));

fn tag_regex(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).expect("invalid tag pattern")
}

/// Analyzes raw markup of one page
///
/// # Arguments
///
/// * `url` - The URL the markup was fetched from
/// * `html` - The raw markup
///
/// # Returns
///
/// The extracted page facts
pub fn analyze_markup(url: &str, html: &str) -> PageAnalysis {
    let counts = count_elements(html);
    let document = Html::parse_document(html);

    PageAnalysis {
        url: url.to_string(),
        title: extract_title(&document).unwrap_or_else(|| UNTITLED_PAGE.to_string()),
        features: detect_features(html, &counts),
        counts,
        navigation_items: extract_navigation_items(&document),
        technologies: detect_technologies(html),
        content: extract_content(html),
    }
}

/// Counts forms, links, images and interactive controls
pub fn count_elements(html: &str) -> ElementCounts {
    ElementCounts {
        forms: count_matches(&FORM_TAG, html),
        links: count_matches(&LINK_TAG, html),
        images: count_matches(&IMG_TAG, html),
        interactive_elements: INTERACTIVE_TAGS
            .iter()
            .map(|re| count_matches(re, html))
            .sum(),
    }
}

fn count_matches(re: &Regex, html: &str) -> u32 {
    re.find_iter(html).count() as u32
}

/// Evaluates every rule of the detection table
pub fn detect_features(html: &str, counts: &ElementCounts) -> PageFeatures {
    let mut features = PageFeatures::default();
    for rule in FEATURE_RULES.iter() {
        features.set(rule.feature, rule.matches(html, counts));
    }
    features
}

/// Detects known frameworks and libraries by substring
pub fn detect_technologies(html: &str) -> Vec<String> {
    let lower = html.to_lowercase();

    TECHNOLOGIES
        .iter()
        .filter(|(_, needles)| needles.iter().any(|needle| lower.contains(needle)))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Strips tags, collapses whitespace and keeps the first [`CONTENT_LIMIT`] characters
pub fn extract_content(html: &str) -> String {
    let text = ANY_TAG.replace_all(html, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().chars().take(CONTENT_LIMIT).collect()
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects the text of anchors inside `<nav>` elements
fn extract_navigation_items(document: &Html) -> Vec<String> {
    let mut items = Vec::new();

    if let Ok(nav_link_selector) = Selector::parse("nav a") {
        for element in document.select(&nav_link_selector) {
            let text = element.text().collect::<String>();
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
                items.push(text);
            }
        }
    }

    items
}

/// Merges navigation items of several pages, keeping first-seen order
pub fn merge_navigation<'a>(pages: impl IntoIterator<Item = &'a PageAnalysis>) -> Vec<String> {
    let mut merged = Vec::new();
    for page in pages {
        for item in &page.navigation_items {
            push_unique(&mut merged, item);
        }
    }
    merged
}
