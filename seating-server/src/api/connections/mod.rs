//! Connection API 模块
//!
//! 宾客之间的关系: positive (同桌), neutral, negative (不可同桌)

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/connections", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).put(handler::upsert))
        .route("/{guest_a}/{guest_b}", delete(handler::delete))
}
