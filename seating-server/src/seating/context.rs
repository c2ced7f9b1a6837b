//! Per-run state: the loaded snapshot plus id-indexed lookups and occupancy

use shared::models::{Assignment, Connection, DiningTable, Guest};
use std::collections::{BTreeSet, HashMap};

use super::position::next_free_seat;

/// Immutable input of one run
#[derive(Debug, Clone, Default)]
pub struct SeatingSnapshot {
    /// Guests in input (id) order
    pub guests: Vec<Guest>,
    /// Tables by capacity descending
    pub tables: Vec<DiningTable>,
    /// Connections in canonical pair order
    pub connections: Vec<Connection>,
}

impl SeatingSnapshot {
    pub fn total_seats(&self) -> usize {
        self.tables.iter().map(|t| t.capacity as usize).sum()
    }
}

/// Mutable seating state owned by a single run
///
/// Tables are addressed by their index in the snapshot's table list, so
/// "table list order" is plain index order.
pub struct RunContext<'a> {
    snapshot: &'a SeatingSnapshot,
    occupied: Vec<BTreeSet<u32>>,
    seats: HashMap<i64, (usize, u32)>,
}

impl<'a> RunContext<'a> {
    /// Every guest starts unseated
    pub fn new(snapshot: &'a SeatingSnapshot) -> Self {
        Self {
            snapshot,
            occupied: vec![BTreeSet::new(); snapshot.tables.len()],
            seats: HashMap::with_capacity(snapshot.guests.len()),
        }
    }

    pub fn snapshot(&self) -> &'a SeatingSnapshot {
        self.snapshot
    }

    pub fn table(&self, idx: usize) -> &'a DiningTable {
        &self.snapshot.tables[idx]
    }

    pub fn free_seats(&self, idx: usize) -> usize {
        (self.table(idx).capacity as usize).saturating_sub(self.occupied[idx].len())
    }

    /// First table in list order with at least `size` free seats
    pub fn first_fit(&self, size: usize, exclude: Option<usize>) -> Option<usize> {
        (0..self.snapshot.tables.len())
            .filter(|&i| Some(i) != exclude)
            .find(|&i| self.free_seats(i) >= size)
    }

    /// Seat a guest at a table on its smallest free position
    ///
    /// A guest already seated elsewhere gives up the old seat first.
    pub fn seat(&mut self, guest_id: i64, idx: usize) -> u32 {
        self.unseat(guest_id);
        let position = next_free_seat(&self.occupied[idx], self.table(idx).capacity);
        self.occupied[idx].insert(position);
        self.seats.insert(guest_id, (idx, position));
        position
    }

    pub fn unseat(&mut self, guest_id: i64) {
        if let Some((idx, position)) = self.seats.remove(&guest_id) {
            self.occupied[idx].remove(&position);
        }
    }

    /// Table index a guest currently sits at
    pub fn table_of(&self, guest_id: i64) -> Option<usize> {
        self.seats.get(&guest_id).map(|&(idx, _)| idx)
    }

    pub fn seated_count(&self) -> usize {
        self.seats.len()
    }

    /// Current assignments in guest input order
    pub fn assignments(&self) -> Vec<Assignment> {
        self.snapshot
            .guests
            .iter()
            .filter_map(|g| {
                self.seats.get(&g.id).map(|&(idx, seat_position)| Assignment {
                    guest_id: g.id,
                    table_id: self.table(idx).id,
                    seat_position,
                })
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::snapshot;
    use super::*;

    #[test]
    fn test_seat_and_reseat() {
        let snap = snapshot(3, &[(10, 2), (11, 2)], &[]);
        let mut ctx = RunContext::new(&snap);

        assert_eq!(ctx.seat(1, 0), 1);
        assert_eq!(ctx.seat(2, 0), 2);
        assert_eq!(ctx.free_seats(0), 0);
        assert_eq!(ctx.first_fit(1, None), Some(1));

        // moving guest 1 frees seat 1 at the first table
        assert_eq!(ctx.seat(1, 1), 1);
        assert_eq!(ctx.free_seats(0), 1);
        assert_eq!(ctx.seat(3, 0), 1);
        assert_eq!(ctx.table_of(1), Some(1));
        assert_eq!(ctx.seated_count(), 3);
    }

    #[test]
    fn test_first_fit_respects_exclude() {
        let snap = snapshot(1, &[(10, 4), (11, 2)], &[]);
        let ctx = RunContext::new(&snap);
        assert_eq!(ctx.first_fit(2, None), Some(0));
        assert_eq!(ctx.first_fit(2, Some(0)), Some(1));
        assert_eq!(ctx.first_fit(3, Some(0)), None);
    }

    #[test]
    fn test_assignments_follow_guest_order() {
        let snap = snapshot(3, &[(10, 4)], &[]);
        let mut ctx = RunContext::new(&snap);
        ctx.seat(3, 0);
        ctx.seat(1, 0);
        let ids: Vec<i64> = ctx.assignments().iter().map(|a| a.guest_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
