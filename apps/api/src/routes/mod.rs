pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::assessments::handlers as assessments;
use crate::cover_letters::handlers as cover_letters;
use crate::dashboard::handlers as dashboard;
use crate::insights::handlers as insights;
use crate::job_search::handlers as job_search;
use crate::linkedin::handlers as linkedin;
use crate::profile::handlers as profile;
use crate::state::AppState;

/// Identifies the caller. Session validation happens upstream of this service.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_update_profile),
        )
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            get(cover_letters::handle_list_cover_letters)
                .post(cover_letters::handle_create_cover_letter),
        )
        .route(
            "/api/v1/cover-letters/:id",
            get(cover_letters::handle_get_cover_letter)
                .put(cover_letters::handle_update_cover_letter)
                .delete(cover_letters::handle_delete_cover_letter),
        )
        // Mock interviews
        .route(
            "/api/v1/assessments",
            get(assessments::handle_list_assessments).post(assessments::handle_create_assessment),
        )
        .route(
            "/api/v1/assessments/:id",
            get(assessments::handle_get_assessment),
        )
        .route(
            "/api/v1/assessments/:id/submit",
            post(assessments::handle_submit_assessment),
        )
        // LinkedIn
        .route(
            "/api/v1/linkedin/generate",
            post(linkedin::handle_generate_linkedin),
        )
        // Job search
        .route("/api/v1/jobs/search", post(job_search::handle_search_jobs))
        // Dashboard
        .route("/api/v1/dashboard", get(dashboard::handle_get_dashboard))
        // Industry insights
        .route("/api/v1/insights", get(insights::handle_get_insight))
        .route(
            "/api/v1/admin/insights/refresh",
            post(insights::handle_refresh_insights),
        )
        .with_state(state)
}
