use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::AppError;
use crate::insights::error::InsightError;
use crate::insights::job::RunSummary;
use crate::insights::models::InsightRecord;
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// GET /api/v1/insights
pub async fn handle_get_insight(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<InsightRecord>, AppError> {
    let record = state
        .insight_store
        .find_by_user(params.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No industry insights for user {}", params.user_id))
        })?;
    Ok(Json(record))
}

/// POST /api/v1/admin/insights/refresh
///
/// Runs the refresh immediately and returns the summary. Per-user failures
/// are reported in the body, not as an error status.
pub async fn handle_refresh_insights(
    State(state): State<AppState>,
) -> Result<Json<RunSummary>, AppError> {
    let summary = state.insight_job.run().await?;
    Ok(Json(summary))
}

impl From<InsightError> for AppError {
    fn from(e: InsightError) -> Self {
        match e {
            InsightError::RunInProgress => AppError::Conflict(e.to_string()),
            InsightError::Persistence(db) => AppError::Database(db),
            InsightError::Generation(msg) | InsightError::MalformedResponse(msg) => {
                AppError::Llm(msg)
            }
            InsightError::InvalidProfile(msg) => AppError::Validation(msg),
            InsightError::Configuration(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}
