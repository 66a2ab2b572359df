//! Analysis data model
//!
//! Value types produced by one analysis run:
//!
//! - `PageAnalysis`: facts extracted from a single fetched page
//! - `SiteAnalysis`: the aggregate over every page of one crawl
//! - `UserStory` and friends: the generated narrative artifacts
//! - `AnalysisResult`: a site analysis plus its stories
//!
//! All types serialize with camelCase field names, the same shape the LLM is
//! asked to return and the JSON export writes.

mod page;
mod site;
mod story;

pub use page::{ElementCounts, Feature, PageAnalysis, PageFeatures, ERROR_PAGE_TITLE, UNTITLED_PAGE};
pub(crate) use site::push_unique;
pub use site::{AnalysisResult, DetectedFeatures, NavigationStructure, SiteAnalysis, SiteStructure};
pub use story::{AcceptanceCriteria, Priority, TestingScenario, UserStory};
