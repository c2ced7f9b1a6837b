//! Connection API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Connection, ConnectionQuery, ConnectionUpsert};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok, ok_with_message, run_blocking};

/// GET /api/connections - 获取关系列表 (可按 guest_id 过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ConnectionQuery>,
) -> AppResult<Json<ApiResponse<Vec<Connection>>>> {
    let repo = state.connections();
    let connections = run_blocking(move || repo.find_all(&query)).await??;
    ok(connections)
}

/// PUT /api/connections - 创建或修改关系类型
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<ConnectionUpsert>,
) -> AppResult<Json<ApiResponse<Connection>>> {
    let repo = state.connections();
    let connection = run_blocking(move || repo.upsert(payload)).await??;
    ok_with_message("Connection saved", connection)
}

/// DELETE /api/connections/:guest_a/:guest_b - 删除关系 (顺序无关)
pub async fn delete(
    State(state): State<ServerState>,
    Path((guest_a, guest_b)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = state.connections();
    run_blocking(move || repo.delete(guest_a, guest_b)).await??;
    ok_with_message("Connection deleted", ())
}
