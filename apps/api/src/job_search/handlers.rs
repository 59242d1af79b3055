use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::job_search::JobListing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobSearchRequest {
    pub keywords: String,
    #[serde(default)]
    pub location: String,
}

/// POST /api/v1/jobs/search
///
/// Upstream failures degrade to an empty result list; they are logged only.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(request): Json<JobSearchRequest>,
) -> Result<Json<Vec<JobListing>>, AppError> {
    let client = state.job_search.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Job search is not configured".to_string())
    })?;

    if request.keywords.trim().is_empty() {
        return Err(AppError::Validation("keywords cannot be empty".to_string()));
    }

    let jobs = client
        .search(request.keywords.trim(), request.location.trim())
        .await
        .unwrap_or_else(|e| {
            warn!("Job search failed: {e}");
            Vec::new()
        });

    Ok(Json(jobs))
}
