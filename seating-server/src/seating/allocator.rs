//! First-fit bin packing of affinity groups into tables

use std::cmp::Reverse;

use super::context::RunContext;
use super::engine::SeatingError;

/// How groups ended up placed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationReport {
    /// Groups seated entirely at one table
    pub whole_groups: usize,
    /// Groups too large for any table, placed as chunks
    pub split_groups: usize,
    /// Guests of chunks that fit nowhere, seated one by one
    pub scattered_guests: usize,
}

/// Split a group into consecutive chunks of at most `chunk_size` guests
pub fn split_into_chunks(group: &[i64], chunk_size: usize) -> Vec<Vec<i64>> {
    group.chunks(chunk_size.max(1)).map(<[i64]>::to_vec).collect()
}

/// Seat every group, largest first
///
/// Each group goes whole to the first table (list order) with enough free
/// seats. A group no table can hold is split into chunks, each placed with
/// the same first-fit scan over all tables; a chunk that still fits nowhere
/// is seated guest by guest. No placement is ever undone.
pub fn allocate(
    ctx: &mut RunContext<'_>,
    groups: &[Vec<i64>],
    chunk_size: usize,
) -> Result<AllocationReport, SeatingError> {
    let mut ordered: Vec<&Vec<i64>> = groups.iter().collect();
    // stable: equal sizes keep group order
    ordered.sort_by_key(|g| Reverse(g.len()));

    let mut report = AllocationReport::default();
    for group in ordered {
        if let Some(idx) = ctx.first_fit(group.len(), None) {
            seat_all(ctx, group, idx);
            report.whole_groups += 1;
            continue;
        }

        report.split_groups += 1;
        let chunks = split_into_chunks(group, chunk_size);
        tracing::debug!(
            size = group.len(),
            chunks = chunks.len(),
            "Affinity group larger than any free table, splitting"
        );
        for chunk in &chunks {
            match ctx.first_fit(chunk.len(), None) {
                Some(idx) => seat_all(ctx, chunk, idx),
                None => {
                    for &guest_id in chunk {
                        let idx = ctx.first_fit(1, None).ok_or_else(|| {
                            let snapshot = ctx.snapshot();
                            SeatingError::CapacityExceeded {
                                guests: snapshot.guests.len(),
                                seats: snapshot.total_seats(),
                            }
                        })?;
                        ctx.seat(guest_id, idx);
                        report.scattered_guests += 1;
                    }
                }
            }
        }
    }

    Ok(report)
}

fn seat_all(ctx: &mut RunContext<'_>, guests: &[i64], idx: usize) {
    for &guest_id in guests {
        ctx.seat(guest_id, idx);
    }
}
