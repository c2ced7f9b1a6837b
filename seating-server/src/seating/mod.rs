//! Seating engine
//!
//! One run reads a snapshot of guests, tables and connections, computes a
//! full assignment in memory and writes it back in a single transaction.
//!
//! ```text
//! validator → cluster → allocator ─┐
//!                                  ├─ position
//!                     conflict ────┘
//!                        ↓
//!                  write-back → summary
//! ```

pub mod allocator;
pub mod cluster;
pub mod conflict;
pub mod context;
pub mod engine;
pub mod position;
pub mod summary;
pub mod validator;

pub use context::{RunContext, SeatingSnapshot};
pub use engine::{SeatingEngine, SeatingError};

use shared::models::Assignment;

use crate::db::StorageResult;

/// Persistence seam consumed by the engine
pub trait SnapshotStore: Send + Sync {
    /// Read guests, tables (capacity descending) and connections in one view
    fn load_snapshot(&self) -> StorageResult<SeatingSnapshot>;

    /// Replace every persisted assignment, all or nothing
    fn replace_assignments(&self, assignments: &[Assignment]) -> StorageResult<()>;
}
