//! Output module for analysis results
//!
//! This module handles:
//! - Exporting testing scenarios as Gherkin feature files
//! - Recording acceptance criteria (currently to the log)
//! - Writing JSON results and printing console reports

mod gherkin;
mod persist;
mod report;

pub use gherkin::{
    export_stories, feature_file_exists, feature_file_name, render_feature, write_feature_file,
    ExportSummary,
};
pub use persist::save_acceptance_criteria;
pub use report::{format_report, print_report, write_json_result};
