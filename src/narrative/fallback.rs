use crate::analysis::{AcceptanceCriteria, Priority, SiteAnalysis, TestingScenario, UserStory};

/// Builds the single navigation story used when no LLM credential is available
pub fn fallback_stories(analysis: &SiteAnalysis) -> Vec<UserStory> {
    let url = &analysis.url;
    let pages = analysis.pages_crawled;

    let detected = analysis.detected_features.detected_names();
    let features = if detected.is_empty() {
        "No special features detected.".to_string()
    } else {
        format!("Detected features: {}", detected.join(", "))
    };

    vec![UserStory {
        id: "story-001".into(),
        title: "As a user, I want to navigate the website effectively, so that I can find the information I need".into(),
        description: format!(
            "Basic navigation and content testing for {url}. {features} Provide a Google Gemini API key for AI-generated, site-specific scenarios."
        ),
        persona: "Website Visitor".into(),
        priority: Priority::High,
        acceptance_criteria: vec![AcceptanceCriteria {
            id: "ac-001-1".into(),
            description: format!(
                "Given I am on {url}, When I navigate through the site, Then I should be able to access all {pages} discovered pages"
            ),
            testable: true,
        }],
        scenarios: vec![TestingScenario {
            id: "nav-001".into(),
            category: "Navigation".into(),
            priority: Priority::High,
            title: "Website Navigation Testing".into(),
            description: format!("Test navigation across the {pages} discovered pages"),
            steps: vec![
                format!("Prerequisites: Open {url} in a browser"),
                "Navigate through all discovered pages".into(),
                "Verify all links work correctly".into(),
                "Check page loading and content display".into(),
            ],
            expected_outcome:
                "All pages should load correctly and navigation should work without errors".into(),
        }],
    }]
}
