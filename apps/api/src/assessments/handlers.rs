use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::assessments::generator::{
    create_assessment, get_assessment, list_assessments, submit_assessment,
    CreateAssessmentRequest, SubmitAnswersRequest,
};
use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// POST /api/v1/assessments
pub async fn handle_create_assessment(
    State(state): State<AppState>,
    Json(request): Json<CreateAssessmentRequest>,
) -> Result<(StatusCode, Json<AssessmentRow>), AppError> {
    request.validate()?;
    let assessment = create_assessment(&state.db, &state.llm, &request).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

/// GET /api/v1/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    Ok(Json(list_assessments(&state.db, params.user_id).await?))
}

/// GET /api/v1/assessments/:id
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AssessmentRow>, AppError> {
    Ok(Json(get_assessment(&state.db, id, params.user_id).await?))
}

/// POST /api/v1/assessments/:id/submit
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitAnswersRequest>,
) -> Result<Json<AssessmentRow>, AppError> {
    if request.answers.is_empty() {
        return Err(AppError::Validation("answers cannot be empty".to_string()));
    }
    let assessment = submit_assessment(&state.db, &state.llm, id, &request).await?;
    Ok(Json(assessment))
}
