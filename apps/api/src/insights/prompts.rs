// LLM prompt constants for industry insight generation.

use crate::llm_client::prompts::fill_template;

/// Insight prompt template.
/// Replace: {industry}, {job_context}
/// `{job_context}` is either empty or " with specific focus on <title> roles".
pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"You are a career insights analyst for the Indian job market. Analyze the {industry} industry{job_context} in India and provide realistic, current market data.

SALARY CALIBRATION (annual, INR):
- Entry-level professionals: 3,00,000 - 8,00,000
- Technology professionals: 8,00,000 - 50,00,000+
- Management roles: 15,00,000 - 80,00,000+
- Medical professionals (doctors, surgeons): 20,00,000 - 1,00,00,000+
- Senior specialists / consultants: 50,00,000 - 2,00,00,000+

Return a JSON object with this EXACT schema (no extra fields):
{
  "salaryRanges": [
    { "role": "Senior Backend Engineer", "min": 1800000, "max": 4500000, "median": 3000000, "location": "Bangalore" }
  ],
  "growthRate": 12.5,
  "demandLevel": "High",
  "topSkills": ["skill1", "skill2"],
  "marketOutlook": "Positive",
  "keyTrends": ["trend1", "trend2"],
  "recommendedSkills": ["skill1", "skill2"]
}

HARD RULES:
1. All salary values are plain numbers in INR per annum, with min <= median <= max
2. Include 5-7 roles relevant to {industry}{job_context}, located in major Indian cities (Mumbai, Delhi, Bangalore, Chennai, Hyderabad)
3. growthRate is the realistic annual industry growth in India, as a percentage number
4. demandLevel is exactly one of "High", "Medium", "Low"
5. marketOutlook is exactly one of "Positive", "Neutral", "Negative"
6. Include 5-7 topSkills, keyTrends and recommendedSkills SPECIFIC to {industry}{job_context}; no generic tech skills unless this is a technology role
7. Cover experience levels: Junior (0-3 years), Mid (3-7 years), Senior (7-15 years), Expert (15+ years)"#;

/// Builds the insight prompt for one user.
pub fn build_insight_prompt(industry: &str, job_title: Option<&str>) -> String {
    let job_context = job_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!(" with specific focus on {t} roles"))
        .unwrap_or_default();

    fill_template(
        INSIGHT_PROMPT_TEMPLATE,
        &[("industry", industry.trim()), ("job_context", job_context.as_str())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_job_title_focus() {
        let prompt = build_insight_prompt("Technology", Some("Backend Engineer"));
        assert!(prompt.contains("Analyze the Technology industry with specific focus on Backend Engineer roles"));
        assert!(!prompt.contains("{industry}"));
        assert!(!prompt.contains("{job_context}"));
    }

    #[test]
    fn test_prompt_without_job_title() {
        let prompt = build_insight_prompt("Healthcare", None);
        assert!(prompt.contains("Analyze the Healthcare industry in India"));
        assert!(!prompt.contains("specific focus"));

        let blank = build_insight_prompt("Healthcare", Some("  "));
        assert_eq!(prompt, blank);
    }

    #[test]
    fn test_job_title_is_not_expanded_as_placeholder() {
        let prompt = build_insight_prompt("Retail", Some("{industry} Lead"));
        assert!(prompt.contains("Analyze the Retail industry with specific focus on {industry} Lead roles"));
    }
}
