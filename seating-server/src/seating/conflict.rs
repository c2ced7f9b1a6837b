//! Single-pass relocation of guests sharing a table with a negative link

use shared::models::{Connection, ConnectionType};

use super::context::RunContext;

/// A guest moved away from a conflicting neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub guest_id: i64,
    pub from_table: i64,
    pub to_table: i64,
    pub seat_position: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictReport {
    pub relocations: Vec<Relocation>,
    /// Negative links still sharing a table after the pass
    pub unresolved: usize,
}

/// Walk negative links once, in stored order
///
/// When both guests share a table the second guest of the pair moves to the
/// first other table (list order) with a free seat. Without one the guest
/// stays put. A move can land next to another negative link that was already
/// examined; the pass does not revisit it.
pub fn resolve_conflicts(ctx: &mut RunContext<'_>, connections: &[Connection]) -> ConflictReport {
    let negatives: Vec<&Connection> = connections
        .iter()
        .filter(|c| c.kind == ConnectionType::Negative)
        .collect();

    let mut report = ConflictReport::default();
    for link in &negatives {
        let Some(current) = shared_table(ctx, link) else {
            continue;
        };

        match ctx.first_fit(1, Some(current)) {
            Some(target) => {
                let seat_position = ctx.seat(link.guest_b, target);
                let relocation = Relocation {
                    guest_id: link.guest_b,
                    from_table: ctx.table(current).id,
                    to_table: ctx.table(target).id,
                    seat_position,
                };
                tracing::debug!(
                    guest_id = relocation.guest_id,
                    avoid = link.guest_a,
                    from = relocation.from_table,
                    to = relocation.to_table,
                    "Relocated guest away from conflict"
                );
                report.relocations.push(relocation);
            }
            None => {
                tracing::debug!(
                    guest_a = link.guest_a,
                    guest_b = link.guest_b,
                    "No free seat elsewhere, conflict left in place"
                );
            }
        }
    }

    let view: &RunContext<'_> = ctx;
    report.unresolved = negatives
        .iter()
        .filter(|link| shared_table(view, link).is_some())
        .count();
    if report.unresolved > 0 {
        tracing::warn!(
            unresolved = report.unresolved,
            "Negative links still seated together after conflict pass"
        );
    }
    report
}

fn shared_table(ctx: &RunContext<'_>, link: &Connection) -> Option<usize> {
    match (ctx.table_of(link.guest_a), ctx.table_of(link.guest_b)) {
        (Some(a), Some(b)) if a == b => Some(a),
        _ => None,
    }
}
