use crate::analysis::SiteAnalysis;
use std::fmt::Write;

/// Builds the story-generation prompt for a site analysis
///
/// The prompt carries only facts observed during the crawl and instructs the
/// model to restrict itself to detected features. The response contract is
/// the camelCase `userStories` shape that [`super::parse_user_stories`] reads.
pub fn build_prompt(analysis: &SiteAnalysis) -> String {
    let features = analysis.detected_features.detected_names().join(", ");
    let technologies = analysis.technologies.join(", ");
    let navigation = analysis.navigation_structure.main_menu_items.join(", ");

    let mut pages = String::new();
    for page in &analysis.pages {
        let _ = writeln!(
            pages,
            "- {}: \"{}\" ({} forms, {} links, {} images)",
            page.url, page.title, page.counts.forms, page.counts.links, page.counts.images
        );
    }

    let structure = &analysis.site_structure;

    format!(
        r#"You are a senior QA consultant. Using the website analysis below, which was collected from the live site, write user stories and test scenarios.

WEBSITE ANALYSIS:
- URL: {url}
- Pages Analyzed: {pages_crawled}
- Detected Features: {features}
- Technologies Found: {technologies}
- Navigation Items: {navigation}

PAGES ANALYZED:
{pages}
SITE STRUCTURE:
- Total Forms: {forms}
- Total Links: {links}
- Total Images: {images}
- Interactive Elements: {interactive}

TEST URLS:
{test_urls}

IMPORTANT: Only write stories and scenarios for features that were ACTUALLY DETECTED above. Do not invent login, checkout or any other functionality that the analysis did not find.

REQUIREMENTS:
1. Write 3-5 user stories grounded in the detected features
2. Titles follow the "AS [persona], I WANT [goal], SO THAT [benefit]" form
3. Give every story 2-4 acceptance criteria in "GIVEN, WHEN, THEN" form
4. Give every story 1-3 scenarios whose first step starts with "Prerequisites:"
5. Use the real URLs listed above in the steps
6. Choose personas that fit this particular website

Respond with JSON only, in exactly this shape:
{{
  "userStories": [
    {{
      "id": "story-001",
      "title": "AS [persona], I WANT [goal], SO THAT [benefit]",
      "description": "Why this story matters for this website",
      "persona": "Specific User Type",
      "priority": "high|medium|low",
      "acceptanceCriteria": [
        {{
          "id": "ac-001-1",
          "description": "GIVEN [context], WHEN [action on a real URL], THEN [expected result]",
          "testable": true
        }}
      ],
      "scenarios": [
        {{
          "id": "scenario-001",
          "category": "Relevant Category",
          "priority": "high|medium|low",
          "title": "Specific Test Scenario Name",
          "description": "What the scenario checks",
          "steps": [
            "Prerequisites: Setup needed before the test",
            "Step 1: Navigate to {url}",
            "Step 2: Act on a detected feature",
            "Step 3: Verify against the real page content"
          ],
          "expectedOutcome": "Expected result on the real site"
        }}
      ]
    }}
  ]
}}

Only cover these detected features: {focus}
"#,
        url = analysis.url,
        pages_crawled = analysis.pages_crawled,
        features = or_placeholder(&features, "None detected"),
        technologies = or_placeholder(&technologies, "None detected"),
        navigation = or_placeholder(&navigation, "None found"),
        pages = pages,
        forms = structure.forms,
        links = structure.links,
        images = structure.images,
        interactive = structure.interactive_elements,
        test_urls = analysis.test_urls.join("\n"),
        focus = or_placeholder(&features, "basic navigation and content display"),
    )
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}
