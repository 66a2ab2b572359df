//! End-to-end analysis: crawl, aggregate, then narrate

use crate::analysis::AnalysisResult;
use crate::config::{validate, Config};
use crate::crawler::SiteAnalyzer;
use crate::narrative::{fallback_stories, LanguageModel, LlmStoryGenerator, RetryPolicy};
use crate::SiteStoryError;

/// Analyzes a site and generates its user stories
///
/// A non-blank `credential` selects the Gemini-backed generator; otherwise
/// the fixed fallback story is used. LLM failures propagate to the caller
/// rather than falling back.
///
/// # Arguments
///
/// * `config` - The run configuration
/// * `url` - The entry URL
/// * `credential` - Gemini API key, if any
///
/// # Returns
///
/// * `Ok(AnalysisResult)` - The site analysis and its stories
/// * `Err(SiteStoryError)` - Invalid config, entry page failure or LLM failure
pub async fn analyze(
    config: &Config,
    url: &str,
    credential: Option<&str>,
) -> Result<AnalysisResult, SiteStoryError> {
    validate(config)?;
    let site = SiteAnalyzer::new(config.crawler.clone())?
        .analyze_site(url)
        .await?;

    let user_stories = match credential.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => {
            tracing::info!("Generating user stories with {}", config.llm.model);
            LlmStoryGenerator::gemini(&config.llm, key)?
                .generate(&site)
                .await
                .inspect_err(|e| tracing::error!("AI generation failed: {}", e))?
        }
        None => {
            tracing::info!("No API key provided, using the basic navigation story");
            fallback_stories(&site)
        }
    };

    Ok(AnalysisResult { site, user_stories })
}

/// Same as [`analyze`] with an explicit language model
pub async fn analyze_with_model<M: LanguageModel>(
    config: &Config,
    url: &str,
    model: M,
) -> Result<AnalysisResult, SiteStoryError> {
    validate(config)?;
    let site = SiteAnalyzer::new(config.crawler.clone())?
        .analyze_site(url)
        .await?;

    let generator = LlmStoryGenerator::new(model, RetryPolicy::from_config(&config.llm));
    let user_stories = generator.generate(&site).await?;

    Ok(AnalysisResult { site, user_stories })
}
