//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 + 数据统计 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "uptime_seconds": 42,
//!   "counts": { "guests": 120, "tables": 14, "connections": 37, "seated": 120 }
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::ServerState;
use crate::db::{SeatingStorage, StorageResult};
use crate::utils::run_blocking;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (healthy | degraded)
    status: &'static str,
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    counts: Option<Counts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
pub struct Counts {
    guests: usize,
    tables: usize,
    connections: usize,
    seated: usize,
}

// 服务器启动时间 (懒加载静态变量)
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn counts(storage: &SeatingStorage) -> StorageResult<Counts> {
    Ok(Counts {
        guests: storage.get_all_guests()?.len(),
        tables: storage.get_all_tables()?.len(),
        connections: storage.get_all_connections()?.len(),
        seated: storage.get_all_assignments()?.len(),
    })
}

/// GET /health - 健康检查
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let storage = state.storage.clone();
    let (status, counts, message) = match run_blocking(move || counts(&storage)).await {
        Ok(Ok(c)) => ("healthy", Some(c), None),
        Ok(Err(e)) => ("degraded", None, Some(format!("Database error: {e}"))),
        Err(e) => ("degraded", None, Some(e.message)),
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: get_uptime_seconds(),
        counts,
        message,
    })
}
