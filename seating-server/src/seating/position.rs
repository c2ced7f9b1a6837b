//! Seat slot selection within one table

use std::collections::BTreeSet;

/// Smallest seat in `1..=capacity` not in `occupied`
///
/// Returns 1 when the table is already full; callers check free capacity
/// before asking for a seat.
pub fn next_free_seat(occupied: &BTreeSet<u32>, capacity: u32) -> u32 {
    // occupied is sorted, so the first gap is the answer
    let mut expected = 1;
    for &seat in occupied.range(1..=capacity) {
        if seat != expected {
            break;
        }
        expected += 1;
    }
    if expected <= capacity { expected } else { 1 }
}
