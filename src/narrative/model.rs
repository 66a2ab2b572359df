//! Language model seam and the Gemini REST implementation

use crate::config::LlmConfig;
use crate::{LlmError, LlmResult};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Upper bound for a single generation request
const GENERATE_TIMEOUT: Duration = Duration::from_secs(120);

/// A text generation backend
///
/// Implementations report failures already classified into [`LlmError`]
/// so the retry policy can decide what to do with them.
pub trait LanguageModel {
    fn generate_content(&self, prompt: &str) -> impl Future<Output = LlmResult<String>> + Send;
}

/// Client for the Gemini `generateContent` REST endpoint
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client for the configured endpoint and model
    ///
    /// A blank `api_key` fails with [`LlmError::MissingCredential`] so no
    /// request is ever sent without one.
    pub fn new(config: &LlmConfig, api_key: &str) -> LlmResult<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(LlmError::MissingCredential);
        }

        let client = Client::builder()
            .timeout(GENERATE_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.to_string(),
        })
    }

    fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl LanguageModel for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> LlmResult<String> {
        let request_body = serde_json::json!({
            "contents": [{
                "parts": [{
                    "text": prompt
                }]
            }]
        });

        tracing::debug!("Sending {} byte prompt to model {}", prompt.len(), self.model);

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Transient(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transient(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_api_error(Some(status), &error_message(&body)));
        }

        let response_json: Value = serde_json::from_str(&body)
            .map_err(|e| LlmError::MalformedResponse(format!("Invalid response body: {e}")))?;

        response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LlmError::MalformedResponse("No text in Gemini response".into()))
    }
}

/// Best-effort message out of an API error body
///
/// Gemini wraps errors as `{"error": {"message": ..., "status": ...}}`; the
/// status name is folded in because it carries codes like `RESOURCE_EXHAUSTED`.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    let error = &json["error"];
    match (error["message"].as_str(), error["status"].as_str()) {
        (Some(message), Some(status)) => format!("{status}: {message}"),
        (Some(message), None) => message.to_string(),
        _ => body.trim().to_string(),
    }
}

/// Maps an API failure onto an error class
///
/// The message is checked first, case-insensitively, in this order:
/// invalid key, quota, rate limit, overload, server/network. Only when the
/// message says nothing recognizable does the HTTP status decide.
pub fn classify_api_error(status: Option<StatusCode>, message: &str) -> LlmError {
    let lower = message.to_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));
    let message = match status {
        Some(status) => format!("[{}] {}", status.as_u16(), message),
        None => message.to_string(),
    };

    if mentions(&["api_key_invalid", "api key"]) {
        return LlmError::InvalidCredential(message);
    }
    if mentions(&["quota"]) {
        return LlmError::QuotaExceeded(message);
    }
    if mentions(&["rate_limit_exceeded", "rate limit"]) {
        return LlmError::RateLimited(message);
    }
    if mentions(&["overloaded", "503"]) {
        return LlmError::Overloaded(message);
    }
    if mentions(&["internal", "unavailable", "500", "502", "504", "fetch", "network"]) {
        return LlmError::Transient(message);
    }

    match status.map(|s| s.as_u16()) {
        Some(401) | Some(403) => LlmError::InvalidCredential(message),
        Some(429) => LlmError::RateLimited(message),
        Some(503) => LlmError::Overloaded(message),
        Some(500..=599) => LlmError::Transient(message),
        _ => LlmError::Other(message),
    }
}
