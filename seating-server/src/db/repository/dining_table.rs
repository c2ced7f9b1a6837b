//! Dining Table Repository

use super::{RepoError, RepoResult};
use crate::db::SeatingStorage;
use redb::WriteTransaction;
use shared::error::ErrorCode;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableShape};
use shared::util::snowflake_id;

pub const MIN_CAPACITY: u32 = 2;
pub const MAX_CAPACITY: u32 = 20;

/// Default canvas coordinate for new tables
const DEFAULT_POSITION: i32 = 100;

#[derive(Clone)]
pub struct DiningTableRepository {
    storage: SeatingStorage,
}

impl DiningTableRepository {
    pub fn new(storage: SeatingStorage) -> Self {
        Self { storage }
    }

    /// Find all tables in creation order
    pub fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        Ok(self.storage.get_all_tables()?)
    }

    /// Find table by id
    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        Ok(self.storage.get_table(id)?)
    }

    /// Create a new dining table
    pub fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        validate_layout(data.capacity, &data.shape)?;
        let name = data.name.trim().to_string();

        let txn = self.storage.begin_write()?;
        self.ensure_unique_name(&txn, &name, None)?;

        let table = DiningTable {
            id: snowflake_id(),
            name,
            capacity: data.capacity,
            shape: data.shape,
            position_x: data.position_x.unwrap_or(DEFAULT_POSITION),
            position_y: data.position_y.unwrap_or(DEFAULT_POSITION),
            head_table: data.head_table.unwrap_or(false),
        };

        self.storage.store_table(&txn, &table)?;
        txn.commit()?;

        tracing::debug!(table_id = table.id, capacity = table.capacity, "Dining table created");
        Ok(table)
    }

    /// Update a dining table
    ///
    /// Capacity may not drop below the number of guests currently seated.
    pub fn update(&self, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let txn = self.storage.begin_write()?;
        let mut table = self
            .storage
            .get_table_txn(&txn, id)?
            .ok_or_else(|| not_found(id))?;

        if let Some(name) = data.name {
            let name = name.trim().to_string();
            self.ensure_unique_name(&txn, &name, Some(id))?;
            table.name = name;
        }
        if let Some(capacity) = data.capacity {
            table.capacity = capacity;
        }
        if let Some(shape) = data.shape {
            table.shape = shape;
        }
        if let Some(x) = data.position_x {
            table.position_x = x;
        }
        if let Some(y) = data.position_y {
            table.position_y = y;
        }
        if let Some(head_table) = data.head_table {
            table.head_table = head_table;
        }

        validate_layout(table.capacity, &table.shape)?;

        let seated = self.storage.seated_count_txn(&txn, id)?;
        if (table.capacity as usize) < seated {
            return Err(RepoError::Conflict(
                ErrorCode::TableCapacityBelowSeated,
                format!(
                    "Table '{}' has {} seated guests, capacity {} is too small",
                    table.name, seated, table.capacity
                ),
            ));
        }

        self.storage.store_table(&txn, &table)?;
        txn.commit()?;
        Ok(table)
    }

    /// Delete a table, refused while guests are seated at it
    pub fn delete(&self, id: i64) -> RepoResult<()> {
        let txn = self.storage.begin_write()?;
        let seated = self.storage.seated_count_txn(&txn, id)?;
        if seated > 0 {
            return Err(RepoError::Conflict(
                ErrorCode::TableHasGuests,
                format!("Table {id} has {seated} seated guests"),
            ));
        }
        if !self.storage.remove_table(&txn, id)? {
            return Err(not_found(id));
        }
        txn.commit()?;

        tracing::debug!(table_id = id, "Dining table deleted");
        Ok(())
    }

    fn ensure_unique_name(
        &self,
        txn: &WriteTransaction,
        name: &str,
        except: Option<i64>,
    ) -> RepoResult<()> {
        if self.storage.table_name_taken_txn(txn, name, except)? {
            return Err(RepoError::Duplicate(format!("Table '{name}'")));
        }
        Ok(())
    }
}

/// Check capacity range, minimum dimensions and elbow room per guest
pub fn validate_layout(capacity: u32, shape: &TableShape) -> RepoResult<()> {
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
        return Err(RepoError::Validation(
            ErrorCode::TableCapacityInvalid,
            format!("Capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}"),
        ));
    }

    match *shape {
        TableShape::Round { diameter_cm } if diameter_cm < 80 => {
            return Err(dimensions("Round tables need a diameter of at least 80cm"));
        }
        TableShape::Rectangular { length_cm, .. } if length_cm < 100 => {
            return Err(dimensions("Rectangular tables need a length of at least 100cm"));
        }
        TableShape::Rectangular { width_cm, .. } if width_cm < 60 => {
            return Err(dimensions("Rectangular tables need a width of at least 60cm"));
        }
        _ => {}
    }

    let per_seat = shape.perimeter_cm() / capacity as f64;
    if per_seat < shape.min_space_per_seat_cm() {
        return Err(dimensions(format!(
            "Not enough room: {per_seat:.0}cm per guest, at least {:.0}cm required",
            shape.min_space_per_seat_cm()
        )));
    }
    Ok(())
}

fn dimensions(msg: impl Into<String>) -> RepoError {
    RepoError::Validation(ErrorCode::TableDimensionsInvalid, msg.into())
}

fn not_found(id: i64) -> RepoError {
    RepoError::NotFound(ErrorCode::TableNotFound, format!("Table {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Assignment, Guest};

    fn round(name: &str, capacity: u32, diameter_cm: u32) -> DiningTableCreate {
        DiningTableCreate {
            name: name.to_string(),
            capacity,
            shape: TableShape::Round { diameter_cm },
            position_x: None,
            position_y: None,
            head_table: None,
        }
    }

    #[test]
    fn test_validate_layout() {
        let round = |d| TableShape::Round { diameter_cm: d };
        assert!(validate_layout(8, &round(160)).is_ok());
        assert!(matches!(
            validate_layout(1, &round(160)),
            Err(RepoError::Validation(ErrorCode::TableCapacityInvalid, _))
        ));
        assert!(validate_layout(21, &round(500)).is_err());
        assert!(validate_layout(2, &round(79)).is_err());
        // pi * 100 / 6 = 52cm per guest
        assert!(matches!(
            validate_layout(6, &round(100)),
            Err(RepoError::Validation(ErrorCode::TableDimensionsInvalid, _))
        ));

        let rect = |l, w| TableShape::Rectangular {
            length_cm: l,
            width_cm: w,
        };
        assert!(validate_layout(10, &rect(200, 80)).is_ok());
        assert!(validate_layout(4, &rect(99, 80)).is_err());
        assert!(validate_layout(4, &rect(120, 59)).is_err());
        // 2 * (100 + 60) / 8 = 40cm per guest
        assert!(validate_layout(8, &rect(100, 60)).is_err());
    }

    #[test]
    fn test_create_applies_defaults() {
        let repo = DiningTableRepository::new(SeatingStorage::open_in_memory().unwrap());
        let table = repo.create(round(" Sposi ", 6, 150)).unwrap();
        assert_eq!(table.name, "Sposi");
        assert_eq!((table.position_x, table.position_y), (100, 100));
        assert!(!table.head_table);
        assert_eq!(repo.find_all().unwrap(), vec![table]);
    }

    #[test]
    fn test_create_rejects_duplicate_name() {
        let repo = DiningTableRepository::new(SeatingStorage::open_in_memory().unwrap());
        repo.create(round("Tavolo 1", 6, 150)).unwrap();
        let err = repo.create(round("tavolo 1", 4, 120)).unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[test]
    fn test_concurrent_creates_keep_names_unique() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        let repo = DiningTableRepository::new(SeatingStorage::open_in_memory().unwrap());
        for i in 0..100 {
            let barrier = Arc::new(Barrier::new(2));
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let repo = repo.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        repo.create(round(&format!("T{i}"), 6, 150))
                    })
                })
                .collect();
            let created = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(Result::is_ok)
                .count();
            assert_eq!(created, 1, "round {i}");
        }
        assert_eq!(repo.find_all().unwrap().len(), 100);
    }

    #[test]
    fn test_rename_to_taken_name_is_rejected() {
        let repo = DiningTableRepository::new(SeatingStorage::open_in_memory().unwrap());
        repo.create(round("Sposi", 6, 150)).unwrap();
        let other = repo.create(round("Amici", 6, 150)).unwrap();

        let err = repo
            .update(
                other.id,
                DiningTableUpdate {
                    name: Some("SPOSI".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let kept = repo
            .update(
                other.id,
                DiningTableUpdate {
                    name: Some("amici".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(kept.name, "amici");
    }

    #[test]
    fn test_seated_tables_guard_delete_and_shrink() {
        let storage = SeatingStorage::open_in_memory().unwrap();
        let repo = DiningTableRepository::new(storage.clone());
        let table = repo.create(round("Amici", 6, 150)).unwrap();

        let txn = storage.begin_write().unwrap();
        for id in 1..=3 {
            storage
                .store_guest(
                    &txn,
                    &Guest {
                        id,
                        first_name: format!("G{id}"),
                        last_name: "Test".to_string(),
                        dietary_tags: Default::default(),
                        seat: None,
                    },
                )
                .unwrap();
        }
        txn.commit().unwrap();
        let seats: Vec<Assignment> = (1..=3)
            .map(|id| Assignment {
                guest_id: id,
                table_id: table.id,
                seat_position: id as u32,
            })
            .collect();
        storage.replace_assignments(&seats).unwrap();

        let err = repo.delete(table.id).unwrap_err();
        assert!(matches!(err, RepoError::Conflict(ErrorCode::TableHasGuests, _)));

        let err = repo
            .update(
                table.id,
                DiningTableUpdate {
                    capacity: Some(2),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Conflict(ErrorCode::TableCapacityBelowSeated, _)
        ));

        let updated = repo
            .update(
                table.id,
                DiningTableUpdate {
                    capacity: Some(4),
                    head_table: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.capacity, 4);
        assert!(updated.head_table);

        storage.replace_assignments(&[]).unwrap();
        repo.delete(table.id).unwrap();
        assert!(repo.find_by_id(table.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_table() {
        let repo = DiningTableRepository::new(SeatingStorage::open_in_memory().unwrap());
        assert!(matches!(
            repo.delete(9),
            Err(RepoError::NotFound(ErrorCode::TableNotFound, _))
        ));
    }
}
