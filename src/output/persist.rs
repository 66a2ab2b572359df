use crate::analysis::UserStory;
use crate::SiteStoryError;
use std::time::Duration;

/// Records the acceptance criteria of a run
///
/// There is no backing store yet: after `delay` the stories are written to
/// the log as pretty-printed JSON together with the URL and a timestamp.
pub async fn save_acceptance_criteria(
    stories: &[UserStory],
    url: &str,
    delay: Duration,
) -> Result<(), SiteStoryError> {
    tokio::time::sleep(delay).await;

    let json = serde_json::to_string_pretty(stories)?;
    let saved_at = chrono::Utc::now().to_rfc3339();

    tracing::info!("Acceptance criteria saved for: {} at {}", url, saved_at);
    tracing::info!("{}", json);

    Ok(())
}
