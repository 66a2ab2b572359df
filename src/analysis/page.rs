use serde::{Deserialize, Serialize};

/// Title recorded for a page that could not be fetched
pub const ERROR_PAGE_TITLE: &str = "Error loading page";

/// Title recorded for a page without a `<title>` element
pub const UNTITLED_PAGE: &str = "No title";

/// A feature that can be detected on a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Login,
    Search,
    ContactForm,
    Newsletter,
    Chatbot,
    FileUpload,
    PaymentForm,
    Ecommerce,
    VideoContent,
    ImageGallery,
    SocialLogin,
    Comments,
    CookieConsent,
}

impl Feature {
    /// Every page-level feature, in rule-table order
    pub const ALL: [Feature; 13] = [
        Feature::Login,
        Feature::Search,
        Feature::ContactForm,
        Feature::Newsletter,
        Feature::Chatbot,
        Feature::FileUpload,
        Feature::PaymentForm,
        Feature::Ecommerce,
        Feature::VideoContent,
        Feature::ImageGallery,
        Feature::SocialLogin,
        Feature::Comments,
        Feature::CookieConsent,
    ];

    /// Display name, as used in prompts and descriptions (flag name without `has`)
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Login => "Login",
            Feature::Search => "Search",
            Feature::ContactForm => "ContactForm",
            Feature::Newsletter => "Newsletter",
            Feature::Chatbot => "Chatbot",
            Feature::FileUpload => "FileUpload",
            Feature::PaymentForm => "PaymentForm",
            Feature::Ecommerce => "Ecommerce",
            Feature::VideoContent => "VideoContent",
            Feature::ImageGallery => "ImageGallery",
            Feature::SocialLogin => "SocialLogin",
            Feature::Comments => "Comments",
            Feature::CookieConsent => "CookieConsent",
        }
    }
}

/// Boolean feature flags detected on one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFeatures {
    pub has_login: bool,
    pub has_search: bool,
    pub has_contact_form: bool,
    pub has_newsletter: bool,
    pub has_chatbot: bool,
    pub has_file_upload: bool,
    pub has_payment_form: bool,
    pub has_ecommerce: bool,
    pub has_video_content: bool,
    pub has_image_gallery: bool,
    pub has_social_login: bool,
    pub has_comments: bool,
    pub has_cookie_consent: bool,
}

impl PageFeatures {
    /// Returns the flag for `feature`
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Login => self.has_login,
            Feature::Search => self.has_search,
            Feature::ContactForm => self.has_contact_form,
            Feature::Newsletter => self.has_newsletter,
            Feature::Chatbot => self.has_chatbot,
            Feature::FileUpload => self.has_file_upload,
            Feature::PaymentForm => self.has_payment_form,
            Feature::Ecommerce => self.has_ecommerce,
            Feature::VideoContent => self.has_video_content,
            Feature::ImageGallery => self.has_image_gallery,
            Feature::SocialLogin => self.has_social_login,
            Feature::Comments => self.has_comments,
            Feature::CookieConsent => self.has_cookie_consent,
        }
    }

    /// Sets the flag for `feature`
    pub fn set(&mut self, feature: Feature, value: bool) {
        let flag = match feature {
            Feature::Login => &mut self.has_login,
            Feature::Search => &mut self.has_search,
            Feature::ContactForm => &mut self.has_contact_form,
            Feature::Newsletter => &mut self.has_newsletter,
            Feature::Chatbot => &mut self.has_chatbot,
            Feature::FileUpload => &mut self.has_file_upload,
            Feature::PaymentForm => &mut self.has_payment_form,
            Feature::Ecommerce => &mut self.has_ecommerce,
            Feature::VideoContent => &mut self.has_video_content,
            Feature::ImageGallery => &mut self.has_image_gallery,
            Feature::SocialLogin => &mut self.has_social_login,
            Feature::Comments => &mut self.has_comments,
            Feature::CookieConsent => &mut self.has_cookie_consent,
        };
        *flag = value;
    }

    /// Returns true if no flag is set
    pub fn is_empty(&self) -> bool {
        Feature::ALL.iter().all(|f| !self.get(*f))
    }
}

/// Structural element counts of one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementCounts {
    pub forms: u32,
    pub links: u32,
    pub images: u32,
    pub interactive_elements: u32,
}

/// Facts extracted from one fetched page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    pub url: String,
    pub title: String,
    #[serde(flatten)]
    pub features: PageFeatures,
    #[serde(flatten)]
    pub counts: ElementCounts,
    pub navigation_items: Vec<String>,
    pub technologies: Vec<String>,
    /// Text content with markup stripped, truncated for prompt context
    pub content: String,
}

impl PageAnalysis {
    /// Builds the placeholder analysis for a page that could not be fetched
    ///
    /// All counts are zero, all flags false and all lists empty.
    pub fn failed(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: ERROR_PAGE_TITLE.to_string(),
            features: PageFeatures::default(),
            counts: ElementCounts::default(),
            navigation_items: Vec::new(),
            technologies: Vec::new(),
            content: String::new(),
        }
    }

    /// Returns true if this is the placeholder for a failed fetch
    pub fn is_failed(&self) -> bool {
        self.title == ERROR_PAGE_TITLE && self.counts == ElementCounts::default()
    }
}
