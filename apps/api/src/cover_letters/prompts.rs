use crate::llm_client::prompts::fill_template;
use crate::models::user::User;

const NOT_SPECIFIED: &str = "Not specified";

/// Cover letter prompt template.
/// Replace: {job_title}, {company_name}, {name}, {industry}, {current_title},
///          {years}, {skills}, {bio}, {job_description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional cover letter for a {job_title} position at {company_name}.

About the candidate:
- Name: {name}
- Industry: {industry}
- Current job title: {current_title}
- Years of experience: {years}
- Skills: {skills}
- Professional background: {bio}

Job description:
{job_description}

Requirements:
1. Professional, enthusiastic tone
2. Highlight skills and experience from the candidate profile that match the job
3. Show understanding of the company's needs based on the job description
4. At most 400 words
5. Business letter format in markdown, opening with a greeting and ending with a professional closing
6. Use only facts present in the candidate profile

Return the letter as clean markdown, without code blocks."#;

pub fn build_cover_letter_prompt(
    user: &User,
    job_title: &str,
    company_name: &str,
    job_description: &str,
) -> String {
    let years = user
        .years_of_experience
        .map(|y| y.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let skills = if user.key_skills.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        user.key_skills.join(", ")
    };

    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("job_title", job_title),
            ("company_name", company_name),
            ("name", or_unspecified(&user.name)),
            ("industry", or_unspecified(&user.industry)),
            ("current_title", or_unspecified(&user.job_title)),
            ("years", years.as_str()),
            ("skills", skills.as_str()),
            ("bio", or_unspecified(&user.bio)),
            ("job_description", job_description),
        ],
    )
}

fn or_unspecified(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            name: Some("Asha Rao".to_string()),
            email: "asha@example.com".to_string(),
            image: None,
            job_title: Some("Backend Engineer".to_string()),
            company_name: None,
            industry: Some("Technology".to_string()),
            years_of_experience: Some(6),
            key_skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            bio: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_fills_profile_fields() {
        let prompt = build_cover_letter_prompt(&user(), "Staff Engineer", "Acme", "Own the API.");
        assert!(prompt.contains("a Staff Engineer position at Acme"));
        assert!(prompt.contains("- Name: Asha Rao"));
        assert!(prompt.contains("- Years of experience: 6"));
        assert!(prompt.contains("- Skills: Rust, PostgreSQL"));
        assert!(prompt.contains("- Professional background: Not specified"));
        assert!(prompt.contains("Own the API."));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_missing_profile_fields_read_not_specified() {
        let mut u = user();
        u.key_skills.clear();
        u.years_of_experience = None;
        u.industry = Some("  ".to_string());
        let prompt = build_cover_letter_prompt(&u, "Engineer", "Acme", "JD");
        assert!(prompt.contains("- Skills: Not specified"));
        assert!(prompt.contains("- Years of experience: Not specified"));
        assert!(prompt.contains("- Industry: Not specified"));
    }

    #[test]
    fn test_placeholders_in_user_text_stay_literal() {
        let mut u = user();
        u.bio = Some("Loves {job_description} templates".to_string());
        let prompt = build_cover_letter_prompt(&u, "{bio} Engineer", "Acme", "Ship the JD.");
        assert!(prompt.contains("a {bio} Engineer position at Acme"));
        assert!(prompt.contains("- Professional background: Loves {job_description} templates"));
        assert_eq!(prompt.matches("Ship the JD.").count(), 1);
    }
}
