//! Seating run orchestration

use parking_lot::Mutex;
use shared::error::{AppError, ErrorCode};
use shared::models::{GenerateResponse, SeatingSummary};
use thiserror::Error;

use super::allocator::{self, AllocationReport};
use super::cluster;
use super::conflict::{self, ConflictReport};
use super::context::RunContext;
use super::summary;
use super::validator::{self, Feasibility};
use super::SnapshotStore;
use crate::core::SeatingConfig;
use crate::db::StorageError;

pub const SUCCESS_MESSAGE: &str = "Seating generated successfully";

/// Seating run errors
#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("No tables available")]
    NoTables,

    #[error("No guests to seat")]
    NoGuests,

    #[error("Not enough seats: {guests} guests for {seats} seats")]
    CapacityExceeded { guests: usize, seats: usize },

    #[error("Failed to load seating data: {0}")]
    Load(#[source] StorageError),

    #[error("Failed to save assignments: {0}")]
    Persistence(#[source] StorageError),
}

impl SeatingError {
    /// Input problems found before anything was written
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SeatingError::NoTables | SeatingError::NoGuests | SeatingError::CapacityExceeded { .. }
        )
    }
}

impl From<SeatingError> for AppError {
    fn from(err: SeatingError) -> Self {
        let message = err.to_string();
        match err {
            SeatingError::NoTables => AppError::with_message(ErrorCode::NoTables, message),
            SeatingError::NoGuests => AppError::with_message(ErrorCode::NoGuests, message),
            SeatingError::CapacityExceeded { guests, seats } => {
                AppError::with_message(ErrorCode::CapacityExceeded, message)
                    .with_detail("guests", guests)
                    .with_detail("seats", seats)
            }
            SeatingError::Load(_) => AppError::database(message),
            SeatingError::Persistence(_) => {
                AppError::with_message(ErrorCode::AssignmentPersistFailed, message)
            }
        }
    }
}

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct SeatingOutcome {
    pub summary: SeatingSummary,
    pub feasibility: Feasibility,
    pub allocation: AllocationReport,
    pub conflicts: ConflictReport,
}

/// The seating engine
///
/// Runs are serialized by an internal lock; each one starts from a fresh
/// snapshot, so edits made between runs are always picked up.
pub struct SeatingEngine<S> {
    store: S,
    config: SeatingConfig,
    run_lock: Mutex<()>,
}

impl<S: SnapshotStore> SeatingEngine<S> {
    pub fn new(store: S, config: SeatingConfig) -> Self {
        Self {
            store,
            config,
            run_lock: Mutex::new(()),
        }
    }

    /// Recompute and persist the whole seating, answering with the response
    /// contract used by the HTTP layer
    pub fn generate(&self) -> GenerateResponse {
        match self.run() {
            Ok(outcome) => GenerateResponse::ok(SUCCESS_MESSAGE, outcome.summary),
            Err(e) => GenerateResponse::failed(e.to_string()),
        }
    }

    /// One full run: validate, cluster, allocate, resolve, write back, report
    pub fn run(&self) -> Result<SeatingOutcome, SeatingError> {
        let _guard = self.run_lock.lock();

        let snapshot = self.store.load_snapshot().map_err(SeatingError::Load)?;
        let feasibility = validator::validate(&snapshot, &self.config)?;

        let groups = cluster::build_affinity_groups(&snapshot.guests, &snapshot.connections);
        tracing::debug!(groups = groups.len(), "Affinity groups built");

        let mut ctx = RunContext::new(&snapshot);
        let allocation = allocator::allocate(&mut ctx, &groups, self.config.chunk_size)?;
        let conflicts = conflict::resolve_conflicts(&mut ctx, &snapshot.connections);
        let assignments = ctx.assignments();

        self.store.replace_assignments(&assignments).map_err(|e| {
            tracing::error!(error = %e, "Seating write-back failed, previous seating kept");
            SeatingError::Persistence(e)
        })?;

        let summary = summary::build_summary(&snapshot, &assignments);
        tracing::info!(
            guests_assigned = summary.stats.guests_assigned,
            tables_used = summary.stats.tables_used,
            connections_satisfied = summary.stats.connections_satisfied,
            conflicts_resolved = summary.stats.conflicts_resolved,
            relocations = conflicts.relocations.len(),
            "Seating generated"
        );

        Ok(SeatingOutcome {
            summary,
            feasibility,
            allocation,
            conflicts,
        })
    }

    /// Report of the seating currently persisted, without recomputing
    pub fn current_summary(&self) -> Result<SeatingSummary, SeatingError> {
        let snapshot = self.store.load_snapshot().map_err(SeatingError::Load)?;
        let assignments = summary::persisted_assignments(&snapshot);
        Ok(summary::build_summary(&snapshot, &assignments))
    }
}
