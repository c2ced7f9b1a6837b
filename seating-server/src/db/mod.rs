//! Database Module
//!
//! redb storage file and per-entity repositories

pub mod repository;
pub mod storage;

pub use storage::{SeatingStorage, StorageError, StorageResult};
