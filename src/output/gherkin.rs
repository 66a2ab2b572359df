//! Gherkin feature-file export
//!
//! One `.feature` file per testing scenario, named after the scenario id and
//! title. Files are written only when asked; callers use
//! [`feature_file_exists`] to avoid overwriting earlier exports.

use crate::analysis::{TestingScenario, UserStory};
use crate::SiteStoryError;
use regex::Regex;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const BROWSERS: &[&str] = &["chrome", "firefox", "safari"];

/// Lowercases `text` and replaces every whitespace run with a single `-`
fn kebab(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&text.to_lowercase(), "-")
        .into_owned()
}

/// File name for a scenario's feature file
///
/// `{id}-{title lowercased, whitespace runs replaced by "-"}.feature`. Every
/// other character is kept as is.
///
/// # Example
///
/// ```
/// use site_story::output::feature_file_name;
///
/// assert_eq!(
///     feature_file_name("test-001", "XSS & SQL Injection Testing"),
///     "test-001-xss-&-sql-injection-testing.feature"
/// );
/// ```
pub fn feature_file_name(id: &str, title: &str) -> String {
    format!("{}-{}.feature", id, kebab(title))
}

/// Returns true if the feature file for this scenario is already in `dir`
///
/// Any filesystem error reads as "does not exist".
pub fn feature_file_exists(dir: &Path, id: &str, title: &str) -> bool {
    fs::metadata(dir.join(feature_file_name(id, title))).is_ok()
}

/// Renders a scenario as a Gherkin feature
pub fn render_feature(scenario: &TestingScenario, story_title: &str, url: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Feature: {} - {}", scenario.category, scenario.title);
    let _ = writeln!(out, "  # Story: {}", story_title);
    out.push('\n');
    out.push_str("Background:\n");
    let _ = writeln!(out, "  Given I am testing the website \"{}\"", url);
    out.push_str("  And I am acting as the user persona for this scenario\n");
    out.push('\n');

    let _ = writeln!(out, "Scenario: {}", scenario.title);
    let _ = writeln!(out, "  # {}", scenario.description);
    out.push('\n');
    out.push_str("  # Test Steps (convert to Gherkin format):\n");
    for (index, step) in scenario.steps.iter().enumerate() {
        let _ = writeln!(out, "  # Step {}: {}", index + 1, step);
    }
    out.push('\n');
    out.push_str("  # Expected Outcome:\n");
    let _ = writeln!(out, "  # {}", scenario.expected_outcome);
    out.push('\n');
    out.push_str("  # Rewrite the steps above as Given/When/Then. Example structure:\n");
    out.push_str("  Given I am on the homepage\n");
    out.push_str("  When I click on the navigation menu\n");
    out.push_str("  Then I should see all menu items clearly labeled\n");
    out.push_str("  And the navigation should work without errors\n");
    out.push('\n');

    let _ = writeln!(out, "@{}", kebab(&scenario.category));
    let _ = writeln!(out, "@{}-priority", scenario.priority);
    let _ = writeln!(
        out,
        "Scenario Outline: {} - Cross Browser Testing",
        scenario.title
    );
    out.push_str("  Given I am using \"<browser>\" browser\n");
    let _ = writeln!(
        out,
        "  When I perform the test steps for \"{}\"",
        scenario.title
    );
    out.push_str("  Then the expected outcome should be achieved\n");
    out.push('\n');
    out.push_str("  Examples:\n");
    out.push_str("    | browser |\n");
    for browser in BROWSERS {
        let _ = writeln!(out, "    | {:<7} |", browser);
    }

    out
}

/// Writes a scenario's feature file into `dir`, creating `dir` if needed
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(SiteStoryError::Output)` - Directory creation or write failed
pub fn write_feature_file(
    dir: &Path,
    scenario: &TestingScenario,
    story_title: &str,
    url: &str,
) -> Result<PathBuf, SiteStoryError> {
    fs::create_dir_all(dir).map_err(|source| SiteStoryError::Output {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(feature_file_name(&scenario.id, &scenario.title));
    fs::write(&path, render_feature(scenario, story_title, url)).map_err(|source| {
        SiteStoryError::Output {
            path: path.clone(),
            source,
        }
    })?;

    tracing::debug!("Wrote feature file {}", path.display());
    Ok(path)
}

/// Outcome of exporting every scenario of a result
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    /// Files left untouched because they already existed
    pub skipped: Vec<PathBuf>,
    /// Target paths that could not be written, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

/// Exports every scenario of every story, skipping files that already exist
///
/// A scenario whose file cannot be written is recorded in
/// [`ExportSummary::failed`] and the export carries on with the next one.
pub fn export_stories(dir: &Path, stories: &[UserStory], url: &str) -> ExportSummary {
    let mut summary = ExportSummary::default();

    for story in stories {
        for scenario in &story.scenarios {
            if feature_file_exists(dir, &scenario.id, &scenario.title) {
                let path = dir.join(feature_file_name(&scenario.id, &scenario.title));
                tracing::info!("Skipping existing feature file {}", path.display());
                summary.skipped.push(path);
                continue;
            }
            match write_feature_file(dir, scenario, &story.title, url) {
                Ok(path) => summary.written.push(path),
                Err(e) => {
                    tracing::warn!("Could not export scenario {}: {}", scenario.id, e);
                    let path = dir.join(feature_file_name(&scenario.id, &scenario.title));
                    summary.failed.push((path, e.to_string()));
                }
            }
        }
    }

    tracing::info!(
        "Exported {} feature files ({} skipped, {} failed) to {}",
        summary.written.len(),
        summary.skipped.len(),
        summary.failed.len(),
        dir.display()
    );
    summary
}
