use crate::llm_client::prompts::fill_template;
use crate::models::assessment::AssessmentQuestion;

/// Quiz generation prompt. Replace: {count}, {level}, {topic}, {industry_context}
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate {count} {level}-level multiple-choice interview questions on {topic}{industry_context}.

Each question must test practical knowledge a hiring panel would actually ask about. Provide exactly 4 options per question, with exactly one correct option.

Return a JSON object with this EXACT schema:
{
  "questions": [
    {
      "question": "string",
      "options": ["string", "string", "string", "string"],
      "correctAnswer": "string, copied verbatim from options",
      "explanation": "one or two sentences on why the answer is correct"
    }
  ]
}"#;

/// Improvement tip prompt. Replace: {topic}, {level}, {mistakes}
pub const IMPROVEMENT_TIP_PROMPT_TEMPLATE: &str = r#"A candidate took a {level}-level mock interview on {topic} and got these questions wrong:

{mistakes}

Write a short, encouraging improvement tip of at most two sentences. Name the knowledge gap to work on. Do not repeat the questions or mention the mistakes explicitly. Return plain text only."#;

pub fn build_quiz_prompt(topic: &str, level: &str, count: u8, industry: Option<&str>) -> String {
    let industry_context = industry
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .map(|i| format!(" for a professional in the {i} industry"))
        .unwrap_or_default();
    let count = count.to_string();

    fill_template(
        QUIZ_PROMPT_TEMPLATE,
        &[
            ("count", count.as_str()),
            ("level", level),
            ("topic", topic.trim()),
            ("industry_context", industry_context.as_str()),
        ],
    )
}

pub fn build_improvement_tip_prompt(
    topic: &str,
    level: &str,
    wrong: &[&AssessmentQuestion],
) -> String {
    let mistakes = wrong
        .iter()
        .map(|q| {
            format!(
                "Question: \"{}\"\nCorrect answer: \"{}\"\nCandidate answer: \"{}\"",
                q.question,
                q.answer,
                q.user_answer.as_deref().unwrap_or("(no answer)")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    fill_template(
        IMPROVEMENT_TIP_PROMPT_TEMPLATE,
        &[
            ("topic", topic),
            ("level", level),
            ("mistakes", mistakes.as_str()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_prompt_with_industry() {
        let prompt = build_quiz_prompt(" React Hooks ", "Advanced", 7, Some("Technology"));
        assert!(prompt.starts_with(
            "Generate 7 Advanced-level multiple-choice interview questions on React Hooks for a professional in the Technology industry."
        ));
        assert!(prompt.contains("\"correctAnswer\""));
    }

    #[test]
    fn test_quiz_prompt_without_industry() {
        let prompt = build_quiz_prompt("SQL", "Beginner", 1, None);
        assert!(prompt.starts_with("Generate 1 Beginner-level multiple-choice interview questions on SQL."));
    }

    #[test]
    fn test_tip_prompt_lists_each_mistake() {
        let q = AssessmentQuestion {
            question: "What does EXPLAIN show?".to_string(),
            options: vec!["Plan".to_string(), "Rows".to_string()],
            answer: "Plan".to_string(),
            explanation: String::new(),
            user_answer: Some("Rows".to_string()),
            is_correct: Some(false),
        };
        let prompt = build_improvement_tip_prompt("SQL", "Beginner", &[&q]);
        assert!(prompt.contains("Question: \"What does EXPLAIN show?\""));
        assert!(prompt.contains("Candidate answer: \"Rows\""));
    }
}
