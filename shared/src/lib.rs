//! Shared types for the seating planner
//!
//! Common types used by the server and its clients: data models,
//! error types and response structures.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
