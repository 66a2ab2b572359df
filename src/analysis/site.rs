use crate::analysis::page::{ElementCounts, PageAnalysis};
use crate::analysis::story::UserStory;
use serde::{Deserialize, Serialize};

/// Summed structural counts across every analyzed page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStructure {
    pub forms: u32,
    pub links: u32,
    pub images: u32,
    pub interactive_elements: u32,
}

impl SiteStructure {
    /// Adds one page's counts to the totals
    pub fn add(&mut self, counts: &ElementCounts) {
        self.forms += counts.forms;
        self.links += counts.links;
        self.images += counts.images;
        self.interactive_elements += counts.interactive_elements;
    }
}

/// Site-wide feature summary
///
/// `has_user_dashboard` and `has_multi_language` need authenticated or
/// locale-aware crawling and are never set by this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedFeatures {
    pub has_login: bool,
    pub has_search: bool,
    pub has_ecommerce: bool,
    pub has_contact_form: bool,
    pub has_newsletter: bool,
    pub has_chatbot: bool,
    pub has_file_upload: bool,
    pub has_payment_form: bool,
    pub has_user_dashboard: bool,
    pub has_multi_language: bool,
    pub has_cookie_consent: bool,
    pub has_video_content: bool,
    pub has_image_gallery: bool,
    pub has_social_login: bool,
    pub has_comments: bool,
}

impl DetectedFeatures {
    /// Flag names paired with their values, in summary order
    pub fn flags(&self) -> [(&'static str, bool); 15] {
        [
            ("Login", self.has_login),
            ("Search", self.has_search),
            ("Ecommerce", self.has_ecommerce),
            ("ContactForm", self.has_contact_form),
            ("Newsletter", self.has_newsletter),
            ("Chatbot", self.has_chatbot),
            ("FileUpload", self.has_file_upload),
            ("PaymentForm", self.has_payment_form),
            ("UserDashboard", self.has_user_dashboard),
            ("MultiLanguage", self.has_multi_language),
            ("CookieConsent", self.has_cookie_consent),
            ("VideoContent", self.has_video_content),
            ("ImageGallery", self.has_image_gallery),
            ("SocialLogin", self.has_social_login),
            ("Comments", self.has_comments),
        ]
    }

    /// Names of the detected features, without the `has` prefix
    pub fn detected_names(&self) -> Vec<&'static str> {
        self.flags()
            .into_iter()
            .filter(|(_, detected)| *detected)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Navigation facts merged across pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationStructure {
    pub main_menu_items: Vec<String>,
    /// Footer extraction is not implemented; always empty
    pub footer_links: Vec<String>,
    pub breadcrumbs: bool,
}

/// Aggregated analysis of one crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAnalysis {
    pub url: String,
    pub pages_crawled: usize,
    /// Analyzed pages, entry page first
    pub pages: Vec<PageAnalysis>,
    pub site_structure: SiteStructure,
    pub technologies: Vec<String>,
    pub detected_features: DetectedFeatures,
    pub page_types: Vec<String>,
    pub navigation_structure: NavigationStructure,
    pub test_urls: Vec<String>,
}

/// A site analysis together with the stories generated from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub site: SiteAnalysis,
    pub user_stories: Vec<UserStory>,
}

/// Appends `item` unless it is already present, keeping first-seen order
pub(crate) fn push_unique(items: &mut Vec<String>, item: &str) {
    if !items.iter().any(|existing| existing == item) {
        items.push(item.to_string());
    }
}
