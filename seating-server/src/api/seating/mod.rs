//! Seating API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/seating/generate | POST | 重新计算并保存全部座位 |
//! | /api/seating | GET | 当前已保存的座位表 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/seating", get(handler::current))
        .route("/api/seating/generate", post(handler::generate))
}
