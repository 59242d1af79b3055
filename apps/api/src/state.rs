use std::sync::Arc;

use sqlx::PgPool;

use crate::insights::{InsightRefreshJob, InsightStore};
use crate::job_search::JobSearchClient;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Read side for the insights endpoint. Same store the refresh job writes to.
    pub insight_store: Arc<dyn InsightStore>,
    /// Shared with the scheduler, so a manual refresh and a scheduled one never overlap.
    pub insight_job: InsightRefreshJob,
    /// `None` when JOOBLE_API_KEY is unset.
    pub job_search: Option<JobSearchClient>,
}
