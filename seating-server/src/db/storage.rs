//! redb-based storage layer for guests, tables, connections and seating
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `guests` | `guest_id` | `Guest` (JSON, seat stripped) | Guest records |
//! | `dining_tables` | `table_id` | `DiningTable` (JSON) | Table layout |
//! | `connections` | `(guest_a, guest_b)` | type tag | Canonical pair links |
//! | `assignments` | `guest_id` | `(table_id, seat)` | Current seating |
//!
//! # Durability
//!
//! Every mutation runs in a single write transaction. The seating write-back
//! clears and refills `assignments` inside one transaction, so a failure
//! anywhere leaves the previously committed seating untouched.

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use shared::models::{Assignment, Connection, ConnectionType, DiningTable, Guest, Seat};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::seating::{SeatingSnapshot, SnapshotStore};

/// Guests: key = guest id, value = JSON-serialized Guest (without seat)
const GUESTS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("guests");

/// Dining tables: key = table id, value = JSON-serialized DiningTable
const DINING_TABLES_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("dining_tables");

/// Connections: key = canonical (guest_a, guest_b), value = type tag
const CONNECTIONS_TABLE: TableDefinition<(i64, i64), &str> = TableDefinition::new("connections");

/// Seating: key = guest id, value = (table id, seat position)
const ASSIGNMENTS_TABLE: TableDefinition<i64, (i64, u32)> = TableDefinition::new("assignments");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupted record: {0}")]
    Corrupted(String),

    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Seating storage backed by redb
#[derive(Clone)]
pub struct SeatingStorage {
    db: Arc<Database>,
}

impl SeatingStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests, embedding hosts)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create all tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(GUESTS_TABLE)?;
            let _ = write_txn.open_table(DINING_TABLES_TABLE)?;
            let _ = write_txn.open_table(CONNECTIONS_TABLE)?;
            let _ = write_txn.open_table(ASSIGNMENTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Guests ==========

    /// Store a guest (seat is never persisted on the guest record)
    pub fn store_guest(&self, txn: &WriteTransaction, guest: &Guest) -> StorageResult<()> {
        let mut table = txn.open_table(GUESTS_TABLE)?;
        let record = Guest {
            seat: None,
            ..guest.clone()
        };
        let value = serde_json::to_vec(&record)?;
        table.insert(guest.id, value.as_slice())?;
        Ok(())
    }

    /// Get a guest by id, with its current seat
    pub fn get_guest(&self, id: i64) -> StorageResult<Option<Guest>> {
        let read_txn = self.db.begin_read()?;
        let guests = read_txn.open_table(GUESTS_TABLE)?;
        let assignments = read_txn.open_table(ASSIGNMENTS_TABLE)?;

        let Some(value) = guests.get(id)? else {
            return Ok(None);
        };
        let mut guest: Guest = serde_json::from_slice(value.value())?;
        guest.seat = assignments.get(id)?.map(|g| {
            let (table_id, position) = g.value();
            Seat { table_id, position }
        });
        Ok(Some(guest))
    }

    /// Get a guest by id, with its current seat (within transaction)
    pub fn get_guest_txn(&self, txn: &WriteTransaction, id: i64) -> StorageResult<Option<Guest>> {
        let guests = txn.open_table(GUESTS_TABLE)?;
        let assignments = txn.open_table(ASSIGNMENTS_TABLE)?;

        let Some(value) = guests.get(id)? else {
            return Ok(None);
        };
        let mut guest: Guest = serde_json::from_slice(value.value())?;
        guest.seat = assignments.get(id)?.map(|g| {
            let (table_id, position) = g.value();
            Seat { table_id, position }
        });
        Ok(Some(guest))
    }

    /// Check a guest exists (within transaction)
    pub fn guest_exists_txn(&self, txn: &WriteTransaction, id: i64) -> StorageResult<bool> {
        let table = txn.open_table(GUESTS_TABLE)?;
        Ok(table.get(id)?.is_some())
    }

    /// Get all guests ordered by id, with their current seats
    pub fn get_all_guests(&self) -> StorageResult<Vec<Guest>> {
        let read_txn = self.db.begin_read()?;
        let guests = read_txn.open_table(GUESTS_TABLE)?;
        let assignments = read_txn.open_table(ASSIGNMENTS_TABLE)?;

        let mut seats: HashMap<i64, Seat> = HashMap::new();
        for result in assignments.iter()? {
            let (key, value) = result?;
            let (table_id, position) = value.value();
            seats.insert(key.value(), Seat { table_id, position });
        }

        let mut out = Vec::with_capacity(guests.len()? as usize);
        for result in guests.iter()? {
            let (key, value) = result?;
            let mut guest: Guest = serde_json::from_slice(value.value())?;
            guest.seat = seats.get(&key.value()).copied();
            out.push(guest);
        }
        Ok(out)
    }

    /// Remove a guest record
    pub fn remove_guest(&self, txn: &WriteTransaction, id: i64) -> StorageResult<bool> {
        let mut table = txn.open_table(GUESTS_TABLE)?;
        Ok(table.remove(id)?.is_some())
    }

    // ========== Dining Tables ==========

    /// Store a dining table
    pub fn store_table(&self, txn: &WriteTransaction, dining_table: &DiningTable) -> StorageResult<()> {
        let mut table = txn.open_table(DINING_TABLES_TABLE)?;
        let value = serde_json::to_vec(dining_table)?;
        table.insert(dining_table.id, value.as_slice())?;
        Ok(())
    }

    /// Get a dining table by id
    pub fn get_table(&self, id: i64) -> StorageResult<Option<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DINING_TABLES_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a dining table by id (within transaction)
    pub fn get_table_txn(
        &self,
        txn: &WriteTransaction,
        id: i64,
    ) -> StorageResult<Option<DiningTable>> {
        let table = txn.open_table(DINING_TABLES_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all dining tables in creation (id) order
    pub fn get_all_tables(&self) -> StorageResult<Vec<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DINING_TABLES_TABLE)?;

        let mut out = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            out.push(serde_json::from_slice(value.value())?);
        }
        Ok(out)
    }

    /// Check whether another table already uses this name, ignoring case (within transaction)
    pub fn table_name_taken_txn(
        &self,
        txn: &WriteTransaction,
        name: &str,
        except: Option<i64>,
    ) -> StorageResult<bool> {
        let table = txn.open_table(DINING_TABLES_TABLE)?;
        for result in table.iter()? {
            let (key, value) = result?;
            if Some(key.value()) == except {
                continue;
            }
            let existing: DiningTable = serde_json::from_slice(value.value())?;
            if existing.name.eq_ignore_ascii_case(name) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Remove a dining table
    pub fn remove_table(&self, txn: &WriteTransaction, id: i64) -> StorageResult<bool> {
        let mut table = txn.open_table(DINING_TABLES_TABLE)?;
        Ok(table.remove(id)?.is_some())
    }

    // ========== Connections ==========

    /// Insert or overwrite a connection (pair must already be canonical)
    pub fn store_connection(
        &self,
        txn: &WriteTransaction,
        connection: &Connection,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(CONNECTIONS_TABLE)?;
        table.insert(
            (connection.guest_a, connection.guest_b),
            connection.kind.as_str(),
        )?;
        Ok(())
    }

    /// Remove a connection by canonical pair
    pub fn remove_connection(
        &self,
        txn: &WriteTransaction,
        guest_a: i64,
        guest_b: i64,
    ) -> StorageResult<bool> {
        let mut table = txn.open_table(CONNECTIONS_TABLE)?;
        Ok(table.remove((guest_a, guest_b))?.is_some())
    }

    /// Remove every connection touching a guest, returns how many were removed
    pub fn remove_connections_of(&self, txn: &WriteTransaction, guest_id: i64) -> StorageResult<usize> {
        let mut table = txn.open_table(CONNECTIONS_TABLE)?;
        let before = table.len()?;
        table.retain(|(a, b), _| a != guest_id && b != guest_id)?;
        Ok((before - table.len()?) as usize)
    }

    /// Get all connections in canonical pair order
    pub fn get_all_connections(&self) -> StorageResult<Vec<Connection>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CONNECTIONS_TABLE)?;

        let mut out = Vec::new();
        for result in table.iter()? {
            let (key, value) = result?;
            let (guest_a, guest_b) = key.value();
            let kind: ConnectionType = value
                .value()
                .parse()
                .map_err(StorageError::Corrupted)?;
            out.push(Connection {
                guest_a,
                guest_b,
                kind,
            });
        }
        Ok(out)
    }

    // ========== Assignments ==========

    /// Remove a guest's seat
    pub fn remove_assignment(&self, txn: &WriteTransaction, guest_id: i64) -> StorageResult<bool> {
        let mut table = txn.open_table(ASSIGNMENTS_TABLE)?;
        Ok(table.remove(guest_id)?.is_some())
    }

    /// Count guests currently seated at a table (within transaction)
    pub fn seated_count_txn(&self, txn: &WriteTransaction, table_id: i64) -> StorageResult<usize> {
        let table = txn.open_table(ASSIGNMENTS_TABLE)?;
        let mut count = 0;
        for result in table.iter()? {
            let (_key, value) = result?;
            if value.value().0 == table_id {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Get the persisted seating, ordered by guest id
    pub fn get_all_assignments(&self) -> StorageResult<Vec<Assignment>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ASSIGNMENTS_TABLE)?;

        let mut out = Vec::new();
        for result in table.iter()? {
            let (key, value) = result?;
            let (table_id, seat_position) = value.value();
            out.push(Assignment {
                guest_id: key.value(),
                table_id,
                seat_position,
            });
        }
        Ok(out)
    }

    /// Atomically replace the whole seating
    ///
    /// Clears every prior assignment and writes the new set. Each row is
    /// checked (guest and table exist, seat within capacity, no duplicate
    /// guest or seat); any failure aborts the transaction.
    pub fn replace_assignments(&self, assignments: &[Assignment]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        match Self::write_assignments(&txn, assignments) {
            Ok(()) => {
                txn.commit()?;
                Ok(())
            }
            Err(e) => {
                if let Err(abort_err) = txn.abort() {
                    tracing::error!(error = %abort_err, "Failed to abort seating transaction");
                }
                Err(e)
            }
        }
    }

    fn write_assignments(txn: &WriteTransaction, assignments: &[Assignment]) -> StorageResult<()> {
        let guests = txn.open_table(GUESTS_TABLE)?;
        let dining_tables = txn.open_table(DINING_TABLES_TABLE)?;
        let mut table = txn.open_table(ASSIGNMENTS_TABLE)?;

        table.retain(|_, _| false)?;

        let mut capacities: HashMap<i64, u32> = HashMap::new();
        let mut taken: HashSet<(i64, u32)> = HashSet::new();

        for a in assignments {
            if guests.get(a.guest_id)?.is_none() {
                return Err(StorageError::InvalidAssignment(format!(
                    "guest {} does not exist",
                    a.guest_id
                )));
            }

            let capacity = match capacities.get(&a.table_id) {
                Some(c) => *c,
                None => {
                    let value = dining_tables.get(a.table_id)?.ok_or_else(|| {
                        StorageError::InvalidAssignment(format!(
                            "table {} does not exist",
                            a.table_id
                        ))
                    })?;
                    let dining_table: DiningTable = serde_json::from_slice(value.value())?;
                    capacities.insert(a.table_id, dining_table.capacity);
                    dining_table.capacity
                }
            };

            if a.seat_position == 0 || a.seat_position > capacity {
                return Err(StorageError::InvalidAssignment(format!(
                    "seat {} out of range 1..={} at table {}",
                    a.seat_position, capacity, a.table_id
                )));
            }
            if !taken.insert((a.table_id, a.seat_position)) {
                return Err(StorageError::InvalidAssignment(format!(
                    "seat {} at table {} assigned twice",
                    a.seat_position, a.table_id
                )));
            }
            if table
                .insert(a.guest_id, (a.table_id, a.seat_position))?
                .is_some()
            {
                return Err(StorageError::InvalidAssignment(format!(
                    "guest {} assigned twice",
                    a.guest_id
                )));
            }
        }

        Ok(())
    }

    /// Load a consistent read snapshot for one seating run
    ///
    /// Guests by id, tables by capacity descending (ties by id), connections
    /// in canonical pair order.
    pub fn load_snapshot(&self) -> StorageResult<SeatingSnapshot> {
        let read_txn = self.db.begin_read()?;

        let guests_table = read_txn.open_table(GUESTS_TABLE)?;
        let assignments_table = read_txn.open_table(ASSIGNMENTS_TABLE)?;
        let mut seats: HashMap<i64, Seat> = HashMap::new();
        for result in assignments_table.iter()? {
            let (key, value) = result?;
            let (table_id, position) = value.value();
            seats.insert(key.value(), Seat { table_id, position });
        }
        let mut guests = Vec::new();
        for result in guests_table.iter()? {
            let (key, value) = result?;
            let mut guest: Guest = serde_json::from_slice(value.value())?;
            guest.seat = seats.get(&key.value()).copied();
            guests.push(guest);
        }

        let tables_table = read_txn.open_table(DINING_TABLES_TABLE)?;
        let mut tables: Vec<DiningTable> = Vec::new();
        for result in tables_table.iter()? {
            let (_key, value) = result?;
            tables.push(serde_json::from_slice(value.value())?);
        }
        // stable: equal capacities keep id order
        tables.sort_by(|a, b| b.capacity.cmp(&a.capacity));

        let connections_table = read_txn.open_table(CONNECTIONS_TABLE)?;
        let mut connections = Vec::new();
        for result in connections_table.iter()? {
            let (key, value) = result?;
            let (guest_a, guest_b) = key.value();
            let kind: ConnectionType = value
                .value()
                .parse()
                .map_err(StorageError::Corrupted)?;
            connections.push(Connection {
                guest_a,
                guest_b,
                kind,
            });
        }

        Ok(SeatingSnapshot {
            guests,
            tables,
            connections,
        })
    }
}

impl SnapshotStore for SeatingStorage {
    fn load_snapshot(&self) -> StorageResult<SeatingSnapshot> {
        SeatingStorage::load_snapshot(self)
    }

    fn replace_assignments(&self, assignments: &[Assignment]) -> StorageResult<()> {
        SeatingStorage::replace_assignments(self, assignments)
    }
}
