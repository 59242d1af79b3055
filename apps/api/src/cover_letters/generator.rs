//! Cover letter generation and storage.
//!
//! Flow: load profile → build prompt → LLM (markdown) → INSERT/UPDATE cover_letters.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::cover_letters::prompts::build_cover_letter_prompt;
use crate::errors::AppError;
use crate::llm_client::prompts::CAREER_WRITER_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::cover_letter::CoverLetterRow;
use crate::profile::store::find_user;

const MAX_JOB_DESCRIPTION_CHARS: usize = 20_000;
const STATUS_COMPLETED: &str = "completed";

/// Request body for creating or regenerating a cover letter.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverLetterRequest {
    pub user_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
}

impl CoverLetterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("job_title", &self.job_title),
            ("company_name", &self.company_name),
            ("job_description", &self.job_description),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        if self.job_description.chars().count() > MAX_JOB_DESCRIPTION_CHARS {
            return Err(AppError::Validation(format!(
                "job_description exceeds {MAX_JOB_DESCRIPTION_CHARS} characters"
            )));
        }
        Ok(())
    }
}

/// Calls the LLM for the letter body. Fails with 404 if the user does not exist.
async fn write_letter(
    pool: &PgPool,
    llm: &LlmClient,
    request: &CoverLetterRequest,
) -> Result<String, AppError> {
    let user = find_user(pool, request.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", request.user_id)))?;

    let prompt = build_cover_letter_prompt(
        &user,
        request.job_title.trim(),
        request.company_name.trim(),
        request.job_description.trim(),
    );

    llm.call_text(&prompt, CAREER_WRITER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate cover letter: {e}")))
}

pub async fn generate_cover_letter(
    pool: &PgPool,
    llm: &LlmClient,
    request: &CoverLetterRequest,
) -> Result<CoverLetterRow, AppError> {
    let content = write_letter(pool, llm, request).await?;

    let letter = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters
            (id, user_id, content, job_description, company_name, job_title, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(&content)
    .bind(request.job_description.trim())
    .bind(request.company_name.trim())
    .bind(request.job_title.trim())
    .bind(STATUS_COMPLETED)
    .fetch_one(pool)
    .await?;

    info!(
        "Generated cover letter {} for user {}",
        letter.id, request.user_id
    );
    Ok(letter)
}

/// Regenerates the letter body and overwrites the stored row. Scoped to the owner.
pub async fn regenerate_cover_letter(
    pool: &PgPool,
    llm: &LlmClient,
    letter_id: Uuid,
    request: &CoverLetterRequest,
) -> Result<CoverLetterRow, AppError> {
    // Fail fast before spending an LLM call on a letter that isn't there.
    get_cover_letter(pool, letter_id, request.user_id).await?;

    let content = write_letter(pool, llm, request).await?;

    sqlx::query_as::<_, CoverLetterRow>(
        r#"
        UPDATE cover_letters SET
            content = $3,
            job_description = $4,
            company_name = $5,
            job_title = $6,
            status = $7,
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(letter_id)
    .bind(request.user_id)
    .bind(&content)
    .bind(request.job_description.trim())
    .bind(request.company_name.trim())
    .bind(request.job_title.trim())
    .bind(STATUS_COMPLETED)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Cover letter {letter_id} not found")))
}

/// All of a user's letters, newest first.
pub async fn list_cover_letters(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<CoverLetterRow>, AppError> {
    Ok(sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_cover_letter(
    pool: &PgPool,
    letter_id: Uuid,
    user_id: Uuid,
) -> Result<CoverLetterRow, AppError> {
    sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE id = $1 AND user_id = $2",
    )
    .bind(letter_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Cover letter {letter_id} not found")))
}

pub async fn delete_cover_letter(
    pool: &PgPool,
    letter_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(letter_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Cover letter {letter_id} not found"
        )));
    }
    Ok(())
}
