//! Per-table report and statistics of a finished seating

use shared::models::{
    Assignment, ConnectionType, Guest, SeatedGuest, SeatingStats, SeatingSummary, TableSeating,
};
use std::collections::{HashMap, HashSet};

use super::context::SeatingSnapshot;

/// Group assignments by table, in table list order, seats ascending
///
/// Tables without guests are left out. Statistics come from the final
/// assignment and the snapshot's connections.
pub fn build_summary(snapshot: &SeatingSnapshot, assignments: &[Assignment]) -> SeatingSummary {
    let guest_by_id: HashMap<i64, &Guest> = snapshot.guests.iter().map(|g| (g.id, g)).collect();
    let table_of: HashMap<i64, i64> = assignments
        .iter()
        .map(|a| (a.guest_id, a.table_id))
        .collect();

    let mut by_table: HashMap<i64, Vec<&Assignment>> = HashMap::new();
    for a in assignments {
        by_table.entry(a.table_id).or_default().push(a);
    }

    let mut tables = Vec::new();
    for table in &snapshot.tables {
        let Some(seated) = by_table.get_mut(&table.id) else {
            continue;
        };
        seated.sort_by_key(|a| a.seat_position);

        let guests: Vec<SeatedGuest> = seated
            .iter()
            .filter_map(|a| {
                guest_by_id.get(&a.guest_id).map(|g| SeatedGuest {
                    id: g.id,
                    name: g.full_name(),
                    seat_position: a.seat_position,
                    dietary_tags: g.dietary_tags.iter().cloned().collect(),
                })
            })
            .collect();

        tables.push(TableSeating {
            id: table.id,
            name: table.name.clone(),
            occupancy: format!("{}/{}", guests.len(), table.capacity),
            guests,
        });
    }

    let together = |a: i64, b: i64| match (table_of.get(&a), table_of.get(&b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    };

    let mut stats = SeatingStats {
        guests_assigned: assignments.len(),
        tables_used: table_of.values().collect::<HashSet<_>>().len(),
        ..Default::default()
    };
    for link in &snapshot.connections {
        let shared = together(link.guest_a, link.guest_b);
        match link.kind {
            ConnectionType::Positive | ConnectionType::Neutral if shared => {
                stats.connections_satisfied += 1
            }
            ConnectionType::Negative if !shared => stats.conflicts_resolved += 1,
            _ => {}
        }
    }

    SeatingSummary { tables, stats }
}

/// Assignments as persisted on the guest records
pub fn persisted_assignments(snapshot: &SeatingSnapshot) -> Vec<Assignment> {
    snapshot
        .guests
        .iter()
        .filter_map(|g| {
            g.seat.map(|seat| Assignment {
                guest_id: g.id,
                table_id: seat.table_id,
                seat_position: seat.position,
            })
        })
        .collect()
}
