use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::cover_letters::generator::{
    delete_cover_letter, generate_cover_letter, get_cover_letter, list_cover_letters,
    regenerate_cover_letter, CoverLetterRequest,
};
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// POST /api/v1/cover-letters
pub async fn handle_create_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<(StatusCode, Json<CoverLetterRow>), AppError> {
    request.validate()?;
    let letter = generate_cover_letter(&state.db, &state.llm, &request).await?;
    Ok((StatusCode::CREATED, Json(letter)))
}

/// GET /api/v1/cover-letters
pub async fn handle_list_cover_letters(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    Ok(Json(list_cover_letters(&state.db, params.user_id).await?))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CoverLetterRow>, AppError> {
    Ok(Json(get_cover_letter(&state.db, id, params.user_id).await?))
}

/// PUT /api/v1/cover-letters/:id
pub async fn handle_update_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    request.validate()?;
    let letter = regenerate_cover_letter(&state.db, &state.llm, id, &request).await?;
    Ok(Json(letter))
}

/// DELETE /api/v1/cover-letters/:id
pub async fn handle_delete_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    delete_cover_letter(&state.db, id, params.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
