use crate::common::{create_test_config, mount_site, stories_reply, GENERATE_PATH};
use site_story::analysis::Priority;
use site_story::narrative::LanguageModel;
use site_story::{analyze, analyze_with_model, LlmError, LlmResult, SiteStoryError};
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_error(code: u16, status: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(code).set_body_json(serde_json::json!({
        "error": {"code": code, "message": message, "status": status}
    }))
}

#[tokio::test]
async fn test_stories_from_model() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stories_reply()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());

    let result = analyze(&config, &entry, Some("test-key"))
        .await
        .expect("analysis should succeed");

    assert_eq!(result.site.pages_crawled, 5);
    assert_eq!(result.user_stories.len(), 1);
    let story = &result.user_stories[0];
    assert_eq!(story.persona, "Shopper");
    assert_eq!(story.scenarios[0].id, "search-001");
    assert_eq!(story.scenarios[0].priority, Priority::Medium);
}

#[tokio::test]
async fn test_rate_limit_is_retried() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    // First call is rate limited, the second succeeds
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(api_error(429, "RATE_LIMIT_EXCEEDED", "Too many requests"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(stories_reply()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());

    let result = analyze(&config, &entry, Some("test-key"))
        .await
        .expect("retry should recover");
    assert_eq!(result.user_stories.len(), 1);
}

#[tokio::test]
async fn test_invalid_key_fails_without_retry() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(api_error(
            400,
            "INVALID_ARGUMENT",
            "API key not valid. Please pass a valid API key.",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());

    let err = analyze(&config, &entry, Some("wrong-key")).await.unwrap_err();
    assert!(matches!(
        err,
        SiteStoryError::Llm(LlmError::InvalidCredential(_))
    ));
    assert!(err.to_string().contains("Invalid LLM API key"));
}

#[tokio::test]
async fn test_quota_fails_without_retry() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(api_error(
            429,
            "RESOURCE_EXHAUSTED",
            "You exceeded your current quota.",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());

    let err = analyze(&config, &entry, Some("key")).await.unwrap_err();
    assert!(matches!(err, SiteStoryError::Llm(LlmError::QuotaExceeded(_))));
}

#[tokio::test]
async fn test_overload_gives_up_after_four_attempts() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(api_error(503, "UNAVAILABLE", "The model is overloaded."))
        .expect(4)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());

    let err = analyze(&config, &entry, Some("key")).await.unwrap_err();
    match err {
        SiteStoryError::Llm(LlmError::Exhausted { attempts, last }) => {
            assert_eq!(attempts, 4);
            assert!(matches!(*last, LlmError::Overloaded(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Answers with prose first, then with a story
struct FlakyModel {
    calls: AtomicUsize,
}

impl LanguageModel for FlakyModel {
    async fn generate_content(&self, prompt: &str) -> LlmResult<String> {
        assert!(prompt.contains("ACTUALLY DETECTED"));
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Ok("Sorry, I am not able to produce JSON today.".to_string());
        }
        Ok(r#"{"userStories": [{"id": "s1", "title": "AS a reader, I WANT pages, SO THAT I read",
            "persona": "Reader", "priority": "low"}]}"#
            .to_string())
    }
}

#[tokio::test]
async fn test_injected_model_malformed_reply_is_retried() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());
    let model = FlakyModel {
        calls: AtomicUsize::new(0),
    };

    let result = analyze_with_model(&config, &entry, model)
        .await
        .expect("second reply parses");
    assert_eq!(result.user_stories.len(), 1);
    assert_eq!(result.user_stories[0].priority, Priority::Low);
}

/// Returns one well-formed story next to one with an unknown priority and no persona
struct LooseModel;

impl LanguageModel for LooseModel {
    async fn generate_content(&self, _prompt: &str) -> LlmResult<String> {
        Ok(r#"{"userStories": [
            {"id": "s1", "title": "AS a reader, I WANT pages, SO THAT I read",
             "persona": "Reader", "priority": "low"},
            {"id": "s2", "title": "AS an admin, I WANT audits", "priority": "critical"}
        ]}"#
        .to_string())
    }
}

#[tokio::test]
async fn test_unknown_priority_keeps_the_whole_reply() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());

    let result = analyze_with_model(&config, &entry, LooseModel)
        .await
        .expect("lenient parse");
    assert_eq!(result.user_stories.len(), 2);
    assert_eq!(result.user_stories[0].priority, Priority::Low);
    assert_eq!(result.user_stories[1].priority, Priority::Medium);
    assert!(result.user_stories[1].persona.is_empty());
}
