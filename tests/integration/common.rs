use site_story::config::{Config, CrawlerConfig, LlmConfig, OutputConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short delays against the given mock server
pub fn create_test_config(server: &MockServer) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages: 5,
            politeness_delay_ms: 10, // Very short for testing
            request_timeout_secs: 5,
            user_agent: "SiteStoryTest/1.0".to_string(),
        },
        llm: LlmConfig {
            endpoint: format!("{}/v1beta", server.uri()),
            model: "gemini-1.5-flash".to_string(),
            max_attempts: 4,
            base_delay_ms: 1,
            rate_limit_jitter_ms: 0,
            overload_jitter_ms: 0,
        },
        output: OutputConfig {
            gherkin_dir: "gherkin-scenarios".to_string(),
            save_delay_ms: 0,
        },
    }
}

pub const HOME_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Acme Widgets</title></head>
<body>
  <nav>
    <a href="/about">About</a>
    <a href="/contact">Contact</a>
  </nav>
  <form action="/search"><input type="search" name="q"></form>
  <a href="/about">About again</a>
  <a href="/contact">Contact</a>
  <a href="./services">Services</a>
  <a href="/brochure.pdf">Brochure</a>
  <a href="mailto:hello@acme.test">Mail</a>
  <a href="https://elsewhere.test/">Partner</a>
  <a href="/team">Team</a>
  <a href="/careers">Careers</a>
  <div class="breadcrumb"></div>
</body>
</html>"#;

pub const ABOUT_HTML: &str = r#"<html><head><title>About Us</title></head>
<body><p>We make widgets.</p><img src="a.jpg"><img src="b.jpg"></body></html>"#;

pub const SERVICES_HTML: &str = r#"<html><head><title>Our Services</title></head>
<body><p>Leave a comment below.</p></body></html>"#;

pub const TEAM_HTML: &str = r#"<html><head><title>Team</title></head><body><p>People</p></body></html>"#;

/// Mounts a small site: home, about, a failing contact page, services, team
pub async fn mount_site(server: &MockServer) {
    let pages = [
        ("/", HOME_HTML),
        ("/about", ABOUT_HTML),
        ("/services", SERVICES_HTML),
        ("/team", TEAM_HTML),
    ];
    for (route, html) in pages {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

/// A model reply carrying one story with one scenario
pub fn stories_reply() -> serde_json::Value {
    let text = r#"Here you go:
```json
{
  "userStories": [
    {
      "id": "story-001",
      "title": "AS a shopper, I WANT to search widgets, SO THAT I find one quickly",
      "description": "Search is on the home page",
      "persona": "Shopper",
      "priority": "high",
      "acceptanceCriteria": [
        {"id": "ac-001-1", "description": "GIVEN the home page, WHEN I search, THEN results show", "testable": true}
      ],
      "scenarios": [
        {
          "id": "search-001",
          "category": "Search",
          "priority": "medium",
          "title": "Search From Home Page",
          "description": "Checks the search box",
          "steps": ["Prerequisites: Open the home page", "Type a query", "Press enter"],
          "expectedOutcome": "Results are listed"
        }
      ]
    }
  ]
}
```"#;
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    })
}

pub const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";
