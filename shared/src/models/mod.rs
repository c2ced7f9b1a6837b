//! Data models
//!
//! Shared between the seating server and its clients (via API).
//! All IDs are `i64` snowflakes.

pub mod connection;
pub mod dining_table;
pub mod guest;
pub mod seating;

// Re-exports
pub use connection::*;
pub use dining_table::*;
pub use guest::*;
pub use seating::*;
