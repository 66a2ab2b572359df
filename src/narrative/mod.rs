//! Narrative generation: turning a site analysis into user stories
//!
//! Two paths produce stories:
//! - `fallback_stories` builds one fixed navigation story, used without a credential
//! - `LlmStoryGenerator` prompts a `LanguageModel` and parses its JSON reply,
//!   retrying classified failures per `RetryPolicy`

mod extract;
mod fallback;
mod generator;
mod model;
mod prompt;
mod retry;

pub use extract::{extract_json_object, parse_user_stories};
pub use fallback::fallback_stories;
pub use generator::LlmStoryGenerator;
pub use model::{classify_api_error, GeminiClient, LanguageModel};
pub use prompt::build_prompt;
pub use retry::{with_retry, RetryPolicy};
