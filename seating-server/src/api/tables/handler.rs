//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

use crate::core::ServerState;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_required_text, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok, ok_with_message, run_blocking};

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<DiningTable>>>> {
    let repo = state.tables();
    let tables = run_blocking(move || repo.find_all()).await??;
    ok(tables)
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    let repo = state.tables();
    let table = run_blocking(move || repo.find_by_id(id)).await??.ok_or_else(|| {
        AppError::with_message(ErrorCode::TableNotFound, format!("Table {id} not found"))
    })?;
    ok(table)
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = state.tables();
    let table = run_blocking(move || repo.create(payload)).await??;
    ok_with_message("Table created", table)
}

/// PUT /api/tables/:id - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    validate_optional_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = state.tables();
    let table = run_blocking(move || repo.update(id, payload)).await??;
    ok_with_message("Table updated", table)
}

/// DELETE /api/tables/:id - 删除桌台 (有宾客入座时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<i64>>> {
    let repo = state.tables();
    run_blocking(move || repo.delete(id)).await??;
    ok_with_message("Table deleted", id)
}
