use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::core::ServerState;

pub mod router_ext;
pub use router_ext::{OneshotResult, OneshotRouter};

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API
        .merge(api::health::router())
        // Data API
        .merge(api::guests::router())
        .merge(api::tables::router())
        .merge(api::connections::router())
        // Seating engine
        .merge(api::seating::router())
}

/// Build a fully configured application with all middleware
///
/// This is used by both the HTTP server and oneshot calls
pub fn build_app() -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - the seating editor runs in the browser
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
}
