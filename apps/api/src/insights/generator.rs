//! Insight generation: prompt in, validated `GeneratedInsights` out.
//!
//! The LLM is reached through the `ContentGenerator` trait so the refresh job
//! can run against a fake in tests. `LlmClient` is the production backend.

use std::time::Duration;

use async_trait::async_trait;

use crate::insights::error::InsightError;
use crate::insights::models::GeneratedInsights;
use crate::insights::prompts::build_insight_prompt;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, LlmClient, LlmError};

/// Free-text completion: one prompt in, raw model text out.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl ContentGenerator for LlmClient {
    async fn generate_text(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.call_text(prompt, system).await
    }
}

/// Generates insights for one industry / job title, bounded by `timeout`.
/// Transport failures and timeouts map to `Generation`; anything wrong with
/// the returned text maps to `MalformedResponse`.
pub async fn generate_insights(
    generator: &dyn ContentGenerator,
    industry: &str,
    job_title: Option<&str>,
    timeout: Duration,
) -> Result<GeneratedInsights, InsightError> {
    let prompt = build_insight_prompt(industry, job_title);

    let text = tokio::time::timeout(timeout, generator.generate_text(&prompt, JSON_ONLY_SYSTEM))
        .await
        .map_err(|_| {
            InsightError::Generation(format!("timed out after {}s", timeout.as_secs_f64()))
        })?
        .map_err(|e| match e {
            LlmError::EmptyContent => InsightError::MalformedResponse(e.to_string()),
            other => InsightError::Generation(other.to_string()),
        })?;

    parse_insights(&text)
}

/// Parses model output into validated insights. Code fences are stripped first.
pub fn parse_insights(text: &str) -> Result<GeneratedInsights, InsightError> {
    let json = strip_json_fences(text);
    let generated: GeneratedInsights = serde_json::from_str(json)
        .map_err(|e| InsightError::MalformedResponse(e.to_string()))?;
    generated.validated()
}
