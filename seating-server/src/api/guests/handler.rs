//! Guest API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Guest, GuestCreate, GuestQuery, GuestUpdate};

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_required_text, validate_optional_text,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok, ok_with_message, run_blocking};

/// GET /api/guests - 获取宾客列表 (search, table_id 过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<GuestQuery>,
) -> AppResult<Json<ApiResponse<Vec<Guest>>>> {
    let repo = state.guests();
    let guests = run_blocking(move || repo.find_all(&query)).await??;
    ok(guests)
}

/// GET /api/guests/:id - 获取单个宾客
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Guest>>> {
    let repo = state.guests();
    let guest = run_blocking(move || repo.find_by_id(id)).await??.ok_or_else(|| {
        AppError::with_message(ErrorCode::GuestNotFound, format!("Guest {id} not found"))
    })?;
    ok(guest)
}

/// POST /api/guests - 创建宾客
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GuestCreate>,
) -> AppResult<Json<ApiResponse<Guest>>> {
    validate_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.other_dietary, "other_dietary", MAX_NOTE_LEN)?;

    let repo = state.guests();
    let guest = run_blocking(move || repo.create(payload)).await??;
    ok_with_message("Guest created", guest)
}

/// PUT /api/guests/:id - 更新宾客
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<GuestUpdate>,
) -> AppResult<Json<ApiResponse<Guest>>> {
    validate_optional_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_optional_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.other_dietary, "other_dietary", MAX_NOTE_LEN)?;

    let repo = state.guests();
    let guest = run_blocking(move || repo.update(id, payload)).await??;
    ok_with_message("Guest updated", guest)
}

/// DELETE /api/guests/:id - 删除宾客 (连同关系和座位)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<i64>>> {
    let repo = state.guests();
    run_blocking(move || repo.delete(id)).await??;
    ok_with_message("Guest deleted", id)
}
