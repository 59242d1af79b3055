pub mod handlers;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub cover_letters_created: i64,
    pub interviews_taken: i64,
    pub average_score: f64,
    pub highest_score: f64,
    pub last_industry_insight_update: Option<DateTime<Utc>>,
}

/// Rounds to one decimal place, treating "no scores yet" as 0.
pub fn round_score(score: Option<f64>) -> f64 {
    score.map(|s| (s * 10.0).round() / 10.0).unwrap_or(0.0)
}

/// Aggregates a user's activity. 404 if the user does not exist.
pub async fn get_dashboard_stats(pool: &PgPool, user_id: Uuid) -> Result<DashboardStats, AppError> {
    let industry: Option<Option<String>> =
        sqlx::query_scalar("SELECT industry FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    let industry =
        industry.ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    let cover_letters_created: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM cover_letters WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    // Unsubmitted interviews count as taken; their NULL score is skipped by AVG/MAX.
    let (interviews_taken, avg_score, max_score): (i64, Option<f64>, Option<f64>) =
        sqlx::query_as(
            r#"
            SELECT COUNT(*), AVG(quiz_score)::FLOAT8, MAX(quiz_score)::FLOAT8
            FROM assessments
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    // Insights are only meaningful once the user has picked an industry.
    let last_industry_insight_update = match industry {
        Some(_) => {
            sqlx::query_scalar("SELECT last_updated FROM industry_insights WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(pool)
                .await?
        }
        None => None,
    };

    Ok(DashboardStats {
        cover_letters_created,
        interviews_taken,
        average_score: round_score(avg_score),
        highest_score: round_score(max_score),
        last_industry_insight_update,
    })
}
