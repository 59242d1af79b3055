//! Mock interview lifecycle.
//!
//! Create: load profile → quiz prompt → LLM (JSON) → validate → INSERT (in_progress).
//! Submit: score answers → improvement tip for wrong answers → UPDATE (completed).

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assessments::prompts::{build_improvement_tip_prompt, build_quiz_prompt};
use crate::errors::AppError;
use crate::llm_client::prompts::{CAREER_WRITER_SYSTEM, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::assessment::{AssessmentQuestion, AssessmentRow};
use crate::profile::store::find_user;

pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";

const MAX_QUESTIONS: u8 = 10;
const DEFAULT_QUESTIONS: u8 = 5;
const MAX_TOPIC_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl InterviewLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewLevel::Beginner => "Beginner",
            InterviewLevel::Intermediate => "Intermediate",
            InterviewLevel::Advanced => "Advanced",
        }
    }
}

fn default_question_count() -> u8 {
    DEFAULT_QUESTIONS
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssessmentRequest {
    pub user_id: Uuid,
    pub topic: String,
    #[serde(default)]
    pub level: InterviewLevel,
    #[serde(default = "default_question_count")]
    pub number_of_questions: u8,
}

impl CreateAssessmentRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(AppError::Validation("topic cannot be empty".to_string()));
        }
        if topic.chars().count() > MAX_TOPIC_CHARS {
            return Err(AppError::Validation(format!(
                "topic exceeds {MAX_TOPIC_CHARS} characters"
            )));
        }
        if !(1..=MAX_QUESTIONS).contains(&self.number_of_questions) {
            return Err(AppError::Validation(format!(
                "number_of_questions must be between 1 and {MAX_QUESTIONS}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswersRequest {
    pub user_id: Uuid,
    /// One answer per question, in question order. Empty string means skipped.
    pub answers: Vec<String>,
}

/// LLM wire shape for a generated quiz.
#[derive(Debug, Deserialize)]
pub struct GeneratedQuiz {
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// Validates generated questions and keeps at most `requested` of them.
pub fn into_questions(
    quiz: GeneratedQuiz,
    requested: usize,
) -> Result<Vec<AssessmentQuestion>, AppError> {
    let mut questions = Vec::with_capacity(requested);

    for generated in quiz.questions.into_iter().take(requested) {
        let question = generated.question.trim().to_string();
        let options: Vec<String> = generated
            .options
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        let answer = generated.correct_answer.trim().to_string();

        if question.is_empty() || options.len() < 2 {
            return Err(AppError::Llm(
                "generated question is missing text or options".to_string(),
            ));
        }
        if !options.contains(&answer) {
            return Err(AppError::Llm(format!(
                "correct answer for '{question}' is not one of its options"
            )));
        }

        questions.push(AssessmentQuestion {
            question,
            options,
            answer,
            explanation: generated.explanation.trim().to_string(),
            user_answer: None,
            is_correct: None,
        });
    }

    if questions.is_empty() {
        return Err(AppError::Llm("LLM returned no questions".to_string()));
    }
    Ok(questions)
}

/// Marks each question and returns the percentage score.
pub fn score_answers(
    questions: &[AssessmentQuestion],
    answers: &[String],
) -> Result<(Vec<AssessmentQuestion>, f64), AppError> {
    if answers.len() != questions.len() {
        return Err(AppError::Validation(format!(
            "expected {} answers, got {}",
            questions.len(),
            answers.len()
        )));
    }

    let marked: Vec<AssessmentQuestion> = questions
        .iter()
        .zip(answers)
        .map(|(q, given)| {
            let given = given.trim();
            AssessmentQuestion {
                user_answer: (!given.is_empty()).then(|| given.to_string()),
                is_correct: Some(given.eq_ignore_ascii_case(q.answer.trim())),
                ..q.clone()
            }
        })
        .collect();

    let correct = marked.iter().filter(|q| q.is_correct == Some(true)).count();
    let score = if marked.is_empty() {
        0.0
    } else {
        correct as f64 / marked.len() as f64 * 100.0
    };
    Ok((marked, score))
}

pub async fn create_assessment(
    pool: &PgPool,
    llm: &LlmClient,
    request: &CreateAssessmentRequest,
) -> Result<AssessmentRow, AppError> {
    let user = find_user(pool, request.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", request.user_id)))?;

    let prompt = build_quiz_prompt(
        &request.topic,
        request.level.as_str(),
        request.number_of_questions,
        user.industry.as_deref(),
    );
    let quiz: GeneratedQuiz = llm
        .call_json(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate interview: {e}")))?;
    let questions = into_questions(quiz, usize::from(request.number_of_questions))?;

    let assessment = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments (id, user_id, topic, level, questions, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(request.topic.trim())
    .bind(request.level.as_str())
    .bind(Json(&questions))
    .bind(STATUS_IN_PROGRESS)
    .fetch_one(pool)
    .await?;

    info!(
        "Generated {}-question interview {} for user {}",
        questions.len(),
        assessment.id,
        request.user_id
    );
    Ok(assessment)
}

/// All of a user's interviews, newest first.
pub async fn list_assessments(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<AssessmentRow>, AppError> {
    Ok(sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_assessment(
    pool: &PgPool,
    assessment_id: Uuid,
    user_id: Uuid,
) -> Result<AssessmentRow, AppError> {
    sqlx::query_as::<_, AssessmentRow>("SELECT * FROM assessments WHERE id = $1 AND user_id = $2")
        .bind(assessment_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {assessment_id} not found")))
}

/// Scores the answers and completes the interview. A completed interview
/// cannot be submitted again.
pub async fn submit_assessment(
    pool: &PgPool,
    llm: &LlmClient,
    assessment_id: Uuid,
    request: &SubmitAnswersRequest,
) -> Result<AssessmentRow, AppError> {
    let assessment = get_assessment(pool, assessment_id, request.user_id).await?;
    if assessment.status == STATUS_COMPLETED {
        return Err(AppError::Conflict(format!(
            "Interview {assessment_id} is already completed"
        )));
    }

    let (marked, score) = score_answers(&assessment.questions, &request.answers)?;
    let improvement_tip = improvement_tip(llm, &assessment, &marked).await;

    let completed = sqlx::query_as::<_, AssessmentRow>(
        r#"
        UPDATE assessments SET
            questions = $3,
            quiz_score = $4,
            improvement_tip = $5,
            status = $6,
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2 AND status = $7
        RETURNING *
        "#,
    )
    .bind(assessment_id)
    .bind(request.user_id)
    .bind(Json(&marked))
    .bind(score)
    .bind(&improvement_tip)
    .bind(STATUS_COMPLETED)
    .bind(STATUS_IN_PROGRESS)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
        AppError::Conflict(format!("Interview {assessment_id} is already completed"))
    })?;

    info!(
        "Interview {assessment_id} completed by user {} with score {score:.1}",
        request.user_id
    );
    Ok(completed)
}

/// A tip is only asked for when something was answered wrong. The tip is
/// optional: an LLM failure leaves it empty rather than failing the submit.
async fn improvement_tip(
    llm: &LlmClient,
    assessment: &AssessmentRow,
    marked: &[AssessmentQuestion],
) -> Option<String> {
    let wrong: Vec<&AssessmentQuestion> = marked
        .iter()
        .filter(|q| q.is_correct == Some(false))
        .collect();
    if wrong.is_empty() {
        return None;
    }

    let prompt = build_improvement_tip_prompt(&assessment.topic, &assessment.level, &wrong);
    match llm.call_text(&prompt, CAREER_WRITER_SYSTEM).await {
        Ok(tip) => Some(tip),
        Err(e) => {
            warn!(
                "Improvement tip generation failed for interview {}: {e}",
                assessment.id
            );
            None
        }
    }
}
