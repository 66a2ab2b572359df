use crate::common::{create_test_config, mount_site};
use site_story::analyze;
use site_story::output::{
    export_stories, feature_file_exists, feature_file_name, write_json_result,
};
use std::fs;
use tempfile::TempDir;
use wiremock::MockServer;

#[tokio::test]
async fn test_export_fallback_scenarios() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());
    let result = analyze(&config, &entry, None).await.expect("analysis");

    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join(&config.output.gherkin_dir);

    let scenario = &result.user_stories[0].scenarios[0];
    assert!(!feature_file_exists(&dir, &scenario.id, &scenario.title));

    let summary = export_stories(&dir, &result.user_stories, &result.site.url);
    assert_eq!(summary.written.len(), 1);
    assert!(summary.skipped.is_empty());
    assert!(summary.failed.is_empty());
    assert_eq!(
        summary.written[0],
        dir.join("nav-001-website-navigation-testing.feature")
    );
    assert!(feature_file_exists(&dir, &scenario.id, &scenario.title));

    let feature = fs::read_to_string(&summary.written[0]).unwrap();
    assert!(feature.starts_with("Feature: Navigation - Website Navigation Testing"));
    assert!(feature.contains(&format!("Given I am testing the website \"{}\"", entry)));
    assert!(feature.contains(&format!("# Step 1: Prerequisites: Open {} in a browser", entry)));
    assert!(feature.contains("@navigation\n@high-priority\n"));

    // A second export leaves the existing file alone
    let again = export_stories(&dir, &result.user_stories, &result.site.url);
    assert!(again.written.is_empty());
    assert_eq!(again.skipped.len(), 1);
}

#[tokio::test]
async fn test_json_result_round_trips() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(&mock_server);
    let entry = format!("{}/", mock_server.uri());
    let result = analyze(&config, &entry, None).await.expect("analysis");

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("result.json");
    write_json_result(&result, &path).unwrap();

    let restored: site_story::AnalysisResult =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(restored, result);
}

#[test]
fn test_feature_file_name_keeps_symbols() {
    assert_eq!(
        feature_file_name("test-001", "XSS & SQL Injection Testing"),
        "test-001-xss-&-sql-injection-testing.feature"
    );
}
