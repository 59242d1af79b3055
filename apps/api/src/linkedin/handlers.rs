use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::linkedin::prompts::build_linkedin_prompt;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::state::AppState;

pub const MAX_HEADLINE_CHARS: usize = 220;
pub const MAX_SUMMARY_CHARS: usize = 2000;

#[derive(Debug, Deserialize)]
pub struct LinkedInRequest {
    pub role: String,
    pub skills: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedInContent {
    pub headline: String,
    pub summary: String,
}

impl LinkedInContent {
    /// Enforces LinkedIn's field limits; the model does not always respect them.
    pub fn within_limits(self) -> Self {
        Self {
            headline: truncate_chars(self.headline.trim(), MAX_HEADLINE_CHARS),
            summary: truncate_chars(self.summary.trim(), MAX_SUMMARY_CHARS),
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// POST /api/v1/linkedin/generate
pub async fn handle_generate_linkedin(
    State(state): State<AppState>,
    Json(request): Json<LinkedInRequest>,
) -> Result<Json<LinkedInContent>, AppError> {
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }
    if request.skills.trim().is_empty() {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }

    let prompt = build_linkedin_prompt(&request.role, &request.skills);
    let content: LinkedInContent = state
        .llm
        .call_json(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate LinkedIn content: {e}")))?;

    Ok(Json(content.within_limits()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_are_applied_by_character() {
        let content = LinkedInContent {
            headline: "🚀".repeat(300),
            summary: format!("  {}  ", "a".repeat(2500)),
        }
        .within_limits();
        assert_eq!(content.headline.chars().count(), MAX_HEADLINE_CHARS);
        assert_eq!(content.summary.len(), MAX_SUMMARY_CHARS);
        assert!(content.summary.starts_with('a'));
    }

    #[test]
    fn test_short_content_is_untouched() {
        let content = LinkedInContent {
            headline: "Backend Engineer | Rust".to_string(),
            summary: "I build services.".to_string(),
        };
        assert_eq!(content.clone().within_limits(), content);
    }

    #[test]
    fn test_prompt_substitutes_role_and_skills() {
        let prompt = build_linkedin_prompt(" Data Scientist ", "Python, ML");
        assert!(prompt.contains("Role: Data Scientist\n"));
        assert!(prompt.contains("Skills: Python, ML"));
    }
}
