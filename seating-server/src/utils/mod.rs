//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - 日志初始化、输入校验

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use axum::Json;

/// 包装成功响应
pub fn ok<T>(data: T) -> AppResult<Json<ApiResponse<T>>> {
    Ok(Json(ApiResponse::success(data)))
}

/// 包装带消息的成功响应
pub fn ok_with_message<T>(message: impl Into<String>, data: T) -> AppResult<Json<ApiResponse<T>>> {
    Ok(Json(ApiResponse::success_with_message(message, data)))
}

/// 在阻塞线程池执行同步调用 (redb 事务、座位引擎)
pub async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("Blocking task failed: {e}")))
}
