use crate::common::{create_test_config, mount_site, GENERATE_PATH};
use site_story::analysis::{Priority, ERROR_PAGE_TITLE};
use site_story::crawler::crawl;
use site_story::{analyze, ConfigError, SiteStoryError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_analysis_without_credential_uses_fallback_story() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    // The model endpoint must never be called without a key
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());

    for credential in [None, Some(""), Some("   ")] {
        let result = analyze(&config, &entry, credential)
            .await
            .expect("analysis should succeed");

        assert_eq!(result.user_stories.len(), 1);
        let story = &result.user_stories[0];
        assert_eq!(story.priority, Priority::High);
        assert_eq!(story.persona, "Website Visitor");
        assert!(story.scenarios[0].steps[0].contains("Prerequisites:"));
        assert!(story.description.contains("Search"));
    }
}

#[tokio::test]
async fn test_discovery_is_capped_and_ordered() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(&mock_server);
    let base = mock_server.uri();
    let entry = format!("{}/", base);

    let site = crawl(&config.crawler, &entry).await.expect("crawl should succeed");

    assert_eq!(
        site.test_urls,
        vec![
            entry.clone(),
            format!("{}/about", base),
            format!("{}/contact", base),
            format!("{}/services", base),
            format!("{}/team", base),
        ]
    );
    assert_eq!(site.pages_crawled, 5);
    assert_eq!(site.pages.len(), 5);
    assert_eq!(site.pages[0].url, entry);
    assert_eq!(site.pages[0].title, "Acme Widgets");
}

#[tokio::test]
async fn test_failed_page_becomes_placeholder() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());

    let site = crawl(&config.crawler, &entry).await.expect("crawl should succeed");

    let contact = site
        .pages
        .iter()
        .find(|p| p.url.ends_with("/contact"))
        .expect("contact page analyzed");
    assert_eq!(contact.title, ERROR_PAGE_TITLE);
    assert!(contact.is_failed());
    assert!(contact.features.is_empty());
    assert!(contact.navigation_items.is_empty());
    assert!(contact.technologies.is_empty());
}

#[tokio::test]
async fn test_site_aggregation() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());

    let site = crawl(&config.crawler, &entry).await.expect("crawl should succeed");

    let total_images: u32 = site.pages.iter().map(|p| p.counts.images).sum();
    let total_links: u32 = site.pages.iter().map(|p| p.counts.links).sum();
    assert_eq!(site.site_structure.images, total_images);
    assert_eq!(site.site_structure.images, 2);
    assert_eq!(site.site_structure.links, total_links);

    // search on the home page, comments on the services page
    assert!(site.detected_features.has_search);
    assert!(site.detected_features.has_comments);
    assert!(!site.detected_features.has_file_upload);
    assert!(!site.detected_features.has_cookie_consent);
    assert!(site.navigation_structure.breadcrumbs);
    assert_eq!(
        site.navigation_structure.main_menu_items,
        vec!["About", "Contact"]
    );
    assert!(site.page_types.contains(&"Homepage".to_string()));
    assert!(site.page_types.contains(&"About Page".to_string()));
    assert!(site.page_types.contains(&"Services Page".to_string()));
}

#[tokio::test]
async fn test_entry_page_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());

    let err = analyze(&config, &entry, None).await.unwrap_err();
    match err {
        SiteStoryError::EntryPage { url, source } => {
            assert_eq!(url, entry);
            assert!(matches!(*source, SiteStoryError::HttpStatus { status: 404, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_entry_is_fatal() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server);

    let err = analyze(&config, "http://127.0.0.1:9/", None)
        .await
        .unwrap_err();
    assert!(matches!(err, SiteStoryError::EntryPage { .. }));
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_fetching() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server);
    config.crawler.max_pages = 0;
    let entry = format!("{}/", mock_server.uri());

    let err = analyze(&config, &entry, None).await.unwrap_err();
    assert!(matches!(
        err,
        SiteStoryError::Config(ConfigError::Validation(_))
    ));
}
