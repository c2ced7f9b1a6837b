//! Seating API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{GenerateResponse, SeatingSummary};

use crate::core::ServerState;
use crate::seating::engine::SUCCESS_MESSAGE;
use crate::utils::{ApiResponse, AppResult, ok, run_blocking};

/// POST /api/seating/generate - 生成座位
///
/// 引擎是同步的，放到阻塞线程池执行。成功 200，输入不可行 400，存储失败 500。
pub async fn generate(
    State(state): State<ServerState>,
) -> AppResult<(StatusCode, Json<GenerateResponse>)> {
    let engine = state.engine.clone();
    let result = run_blocking(move || engine.run()).await?;

    Ok(match result {
        Ok(outcome) => (
            StatusCode::OK,
            Json(GenerateResponse::ok(SUCCESS_MESSAGE, outcome.summary)),
        ),
        Err(e) => {
            let status = if e.is_validation() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            tracing::info!(error = %e, "Seating not generated");
            (status, Json(GenerateResponse::failed(e.to_string())))
        }
    })
}

/// GET /api/seating - 获取当前座位表
pub async fn current(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<SeatingSummary>>> {
    let engine = state.engine.clone();
    let summary = run_blocking(move || engine.current_summary()).await??;
    ok(summary)
}
