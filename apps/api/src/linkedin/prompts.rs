use crate::llm_client::prompts::fill_template;

/// LinkedIn headline + summary prompt. Replace: {role}, {skills}
pub const LINKEDIN_PROMPT_TEMPLATE: &str = r#"You are a LinkedIn profile optimization expert. Write a catchy, search-friendly headline and a professional summary for a professional with these details:

Role: {role}
Skills: {skills}

Return a JSON object with this EXACT schema:
{
  "headline": "at most 220 characters, keyword-rich, emojis allowed where they fit",
  "summary": "first-person professional summary, at most 2000 characters, highlighting the key skills"
}"#;

pub fn build_linkedin_prompt(role: &str, skills: &str) -> String {
    fill_template(
        LINKEDIN_PROMPT_TEMPLATE,
        &[("role", role.trim()), ("skills", skills.trim())],
    )
}
