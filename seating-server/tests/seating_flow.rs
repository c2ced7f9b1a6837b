//! End-to-end seating runs against the redb storage

use std::collections::{HashMap, HashSet};

use seating_server::db::repository::{
    ConnectionRepository, DiningTableRepository, GuestRepository,
};
use seating_server::{SeatingConfig, SeatingEngine, SeatingError, SeatingStorage};
use shared::models::{
    Assignment, ConnectionType, ConnectionUpsert, DiningTable, DiningTableCreate, Guest,
    GuestCreate, TableShape,
};

struct Fixture {
    storage: SeatingStorage,
    engine: SeatingEngine<SeatingStorage>,
    guests: Vec<Guest>,
    tables: Vec<DiningTable>,
}

impl Fixture {
    /// `n` guests named G1..Gn and round tables of the given capacities
    fn new(n: usize, capacities: &[u32]) -> Self {
        let storage = SeatingStorage::open_in_memory().unwrap();
        let guest_repo = GuestRepository::new(storage.clone());
        let table_repo = DiningTableRepository::new(storage.clone());

        let guests = (1..=n)
            .map(|i| {
                guest_repo
                    .create(GuestCreate {
                        first_name: format!("G{i}"),
                        last_name: "Ospite".to_string(),
                        ..Default::default()
                    })
                    .unwrap()
            })
            .collect();
        let tables = capacities
            .iter()
            .enumerate()
            .map(|(i, &capacity)| {
                table_repo
                    .create(DiningTableCreate {
                        name: format!("Tavolo {}", i + 1),
                        capacity,
                        shape: TableShape::Round { diameter_cm: 400 },
                        position_x: None,
                        position_y: None,
                        head_table: None,
                    })
                    .unwrap()
            })
            .collect();

        let engine = SeatingEngine::new(storage.clone(), SeatingConfig::default());
        Self {
            storage,
            engine,
            guests,
            tables,
        }
    }

    /// Guest id by 1-based label (G1 is 1)
    fn id(&self, label: usize) -> i64 {
        self.guests[label - 1].id
    }

    fn link(&self, a: usize, b: usize, kind: ConnectionType) {
        ConnectionRepository::new(self.storage.clone())
            .upsert(ConnectionUpsert {
                guest_a: self.id(a),
                guest_b: self.id(b),
                kind,
            })
            .unwrap();
    }

    fn table_of(&self, label: usize) -> Option<i64> {
        let id = self.id(label);
        self.storage
            .get_all_assignments()
            .unwrap()
            .into_iter()
            .find(|a| a.guest_id == id)
            .map(|a| a.table_id)
    }

    fn assert_invariants(&self) {
        let assignments = self.storage.get_all_assignments().unwrap();
        let capacity: HashMap<i64, u32> = self.tables.iter().map(|t| (t.id, t.capacity)).collect();

        let mut seats = HashSet::new();
        let mut per_table: HashMap<i64, u32> = HashMap::new();
        for a in &assignments {
            let cap = capacity[&a.table_id];
            assert!((1..=cap).contains(&a.seat_position));
            assert!(seats.insert((a.table_id, a.seat_position)), "seat taken twice");
            *per_table.entry(a.table_id).or_default() += 1;
        }
        for (table_id, used) in per_table {
            assert!(used <= capacity[&table_id]);
        }
        assert_eq!(assignments.len(), self.guests.len());
    }
}

#[test]
fn positive_link_keeps_pair_together() {
    let fx = Fixture::new(8, &[6, 4]);
    fx.link(1, 2, ConnectionType::Positive);

    let outcome = fx.engine.run().unwrap();
    fx.assert_invariants();
    assert_eq!(fx.table_of(1), fx.table_of(2));
    assert_eq!(outcome.summary.stats.guests_assigned, 8);
    assert_eq!(outcome.summary.stats.tables_used, 2);
    assert_eq!(outcome.summary.stats.connections_satisfied, 1);
}

#[test]
fn negative_link_splits_pair() {
    let fx = Fixture::new(4, &[6, 4]);
    fx.link(3, 4, ConnectionType::Negative);

    let outcome = fx.engine.run().unwrap();
    fx.assert_invariants();
    assert_ne!(fx.table_of(3), fx.table_of(4));
    assert_eq!(outcome.conflicts.relocations.len(), 1);
    assert_eq!(outcome.conflicts.relocations[0].guest_id, fx.id(4));
    assert_eq!(outcome.summary.stats.conflicts_resolved, 1);
}

#[test]
fn capacity_exceeded_persists_nothing() {
    let fx = Fixture::new(5, &[4]);

    let response = fx.engine.generate();
    assert!(!response.success);
    assert_eq!(response.message, "Not enough seats: 5 guests for 4 seats");
    assert!(fx.storage.get_all_assignments().unwrap().is_empty());

    assert!(matches!(
        fx.engine.run(),
        Err(SeatingError::CapacityExceeded { guests: 5, seats: 4 })
    ));
}

#[test]
fn seventy_percent_occupancy_still_succeeds() {
    let fx = Fixture::new(7, &[6, 4]);

    let outcome = fx.engine.run().unwrap();
    fx.assert_invariants();
    assert_eq!((outcome.feasibility.guests, outcome.feasibility.seats), (7, 10));
    assert_eq!(outcome.summary.stats.guests_assigned, 7);
}

#[test]
fn large_affinity_group_is_chunked() {
    let fx = Fixture::new(9, &[4, 4, 4]);
    for i in 1..9 {
        fx.link(i, i + 1, ConnectionType::Positive);
    }

    let outcome = fx.engine.run().unwrap();
    fx.assert_invariants();
    assert_eq!(outcome.allocation.split_groups, 1);
    assert!((1..=4).all(|g| fx.table_of(g) == fx.table_of(1)));
    assert!((5..=8).all(|g| fx.table_of(g) == fx.table_of(5)));
    assert_ne!(fx.table_of(1), fx.table_of(5));
}

#[test]
fn rerun_replaces_previous_seating() {
    let fx = Fixture::new(6, &[4, 4]);
    fx.engine.run().unwrap();
    let first = fx.storage.get_all_assignments().unwrap();

    // a new negative link changes the next run
    fx.link(1, 2, ConnectionType::Negative);
    fx.engine.run().unwrap();
    fx.assert_invariants();
    assert_ne!(fx.table_of(1), fx.table_of(2));
    assert_ne!(fx.storage.get_all_assignments().unwrap(), first);
}

#[test]
fn failed_write_back_keeps_previous_seating() {
    let fx = Fixture::new(3, &[4]);
    fx.engine.run().unwrap();
    let before = fx.engine.current_summary().unwrap();

    let bogus = Assignment {
        guest_id: fx.id(1),
        table_id: fx.tables[0].id,
        seat_position: 99,
    };
    assert!(fx.storage.replace_assignments(&[bogus]).is_err());

    assert_eq!(fx.engine.current_summary().unwrap(), before);
    fx.assert_invariants();
}

#[test]
fn current_summary_matches_generated_report() {
    let fx = Fixture::new(5, &[4, 2]);
    fx.link(1, 5, ConnectionType::Positive);

    let generated = fx.engine.run().unwrap().summary;
    assert_eq!(fx.engine.current_summary().unwrap(), generated);

    let seated: usize = generated.tables.iter().map(|t| t.guests.len()).sum();
    assert_eq!(seated, 5);
    for table in &generated.tables {
        let seats: Vec<u32> = table.guests.iter().map(|g| g.seat_position).collect();
        let mut sorted = seats.clone();
        sorted.sort_unstable();
        assert_eq!(seats, sorted);
    }
}
