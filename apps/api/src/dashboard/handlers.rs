use axum::{
    extract::{Query, State},
    Json,
};

use crate::dashboard::{get_dashboard_stats, DashboardStats};
use crate::errors::AppError;
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(get_dashboard_stats(&state.db, params.user_id).await?))
}
