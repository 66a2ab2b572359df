use crate::analysis::{SiteAnalysis, UserStory};
use crate::config::LlmConfig;
use crate::narrative::extract::parse_user_stories;
use crate::narrative::model::{GeminiClient, LanguageModel};
use crate::narrative::prompt::build_prompt;
use crate::narrative::retry::{with_retry, RetryPolicy};
use crate::LlmResult;

/// Generates user stories by prompting a language model
///
/// Each attempt sends the prompt and parses the reply; a reply without
/// usable JSON counts as a failed attempt just like an API error.
pub struct LlmStoryGenerator<M> {
    model: M,
    policy: RetryPolicy,
}

impl LlmStoryGenerator<GeminiClient> {
    /// Creates a Gemini-backed generator
    ///
    /// # Returns
    ///
    /// * `Err(LlmError::MissingCredential)` - `api_key` is blank
    pub fn gemini(config: &LlmConfig, api_key: &str) -> LlmResult<Self> {
        Ok(Self::new(
            GeminiClient::new(config, api_key)?,
            RetryPolicy::from_config(config),
        ))
    }
}

impl<M: LanguageModel> LlmStoryGenerator<M> {
    pub fn new(model: M, policy: RetryPolicy) -> Self {
        Self { model, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Generates stories for `analysis`, retrying per the policy
    pub async fn generate(&self, analysis: &SiteAnalysis) -> LlmResult<Vec<UserStory>> {
        let prompt = build_prompt(analysis);
        tracing::debug!("Built story prompt of {} bytes", prompt.len());

        let stories = with_retry(&self.policy, |_attempt| {
            let prompt = &prompt;
            let model = &self.model;
            async move {
                let text = model.generate_content(prompt).await?;
                parse_user_stories(&text)
            }
        })
        .await?;

        tracing::info!("Generated {} user stories for {}", stories.len(), analysis.url);
        Ok(stories)
    }
}
