//! Human-readable and JSON reports of an analysis result

use crate::analysis::AnalysisResult;
use crate::SiteStoryError;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Writes the full result as pretty-printed JSON
pub fn write_json_result(result: &AnalysisResult, path: &Path) -> Result<(), SiteStoryError> {
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json).map_err(|source| SiteStoryError::Output {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote analysis result to {}", path.display());
    Ok(())
}

/// Prints the report to stdout
pub fn print_report(result: &AnalysisResult) {
    print!("{}", format_report(result));
}

/// Formats an analysis result as a plain-text report
pub fn format_report(result: &AnalysisResult) -> String {
    let site = &result.site;
    let mut out = String::new();

    let _ = writeln!(out, "=== Site Analysis: {} ===\n", site.url);

    out.push_str("Overview:\n");
    let _ = writeln!(out, "  Pages analyzed: {}", site.pages_crawled);
    let _ = writeln!(out, "  Forms: {}", site.site_structure.forms);
    let _ = writeln!(out, "  Links: {}", site.site_structure.links);
    let _ = writeln!(out, "  Images: {}", site.site_structure.images);
    let _ = writeln!(
        out,
        "  Interactive elements: {}",
        site.site_structure.interactive_elements
    );
    out.push('\n');

    let features = site.detected_features.detected_names();
    let _ = writeln!(out, "Detected Features ({}):", features.len());
    if features.is_empty() {
        out.push_str("  none\n");
    }
    for feature in features {
        let _ = writeln!(out, "  - {}", feature);
    }
    out.push('\n');

    if !site.technologies.is_empty() {
        let _ = writeln!(out, "Technologies: {}\n", site.technologies.join(", "));
    }
    if !site.page_types.is_empty() {
        let _ = writeln!(out, "Page Types: {}\n", site.page_types.join(", "));
    }

    out.push_str("Pages:\n");
    for page in &site.pages {
        let marker = if page.is_failed() { " (failed)" } else { "" };
        let _ = writeln!(out, "  - {} \"{}\"{}", page.url, page.title, marker);
    }
    out.push('\n');

    let _ = writeln!(out, "User Stories ({}):", result.user_stories.len());
    for story in &result.user_stories {
        let _ = writeln!(
            out,
            "  [{}] {} ({}, persona: {})",
            story.id, story.title, story.priority, story.persona
        );
        for criterion in &story.acceptance_criteria {
            let _ = writeln!(out, "      AC {}: {}", criterion.id, criterion.description);
        }
        for scenario in &story.scenarios {
            let _ = writeln!(
                out,
                "      Scenario {}: {} [{}, {}] - {} steps",
                scenario.id,
                scenario.title,
                scenario.category,
                scenario.priority,
                scenario.steps.len()
            );
        }
    }

    out
}
