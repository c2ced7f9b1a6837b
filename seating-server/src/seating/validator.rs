//! Pre-flight feasibility checks, run before anything is mutated

use super::context::SeatingSnapshot;
use super::engine::SeatingError;
use crate::core::SeatingConfig;

/// Head counts of a snapshot that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feasibility {
    pub guests: usize,
    pub seats: usize,
    /// Guests fill less than the configured share of seats
    pub low_occupancy: bool,
}

pub fn validate(snapshot: &SeatingSnapshot, config: &SeatingConfig) -> Result<Feasibility, SeatingError> {
    if snapshot.tables.is_empty() {
        return Err(SeatingError::NoTables);
    }
    if snapshot.guests.is_empty() {
        return Err(SeatingError::NoGuests);
    }

    let guests = snapshot.guests.len();
    let seats = snapshot.total_seats();
    if guests > seats {
        return Err(SeatingError::CapacityExceeded { guests, seats });
    }

    let low_occupancy = (guests as f64) < seats as f64 * config.low_occupancy_ratio;
    if low_occupancy {
        tracing::warn!(guests, seats, "Many empty seats: {guests} guests for {seats} seats");
    }

    Ok(Feasibility {
        guests,
        seats,
        low_occupancy,
    })
}

#[cfg(test)]
mod tests {
    use super::super::context::fixtures::snapshot;
    use super::*;
    use parking_lot::Mutex;
    use std::io::Write;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a WARN-level subscriber scoped to this thread and return what it logged
    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let sink = LogSink::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let out = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8_lossy(&sink.0.lock()).into_owned();
        (out, logs)
    }

    #[test]
    fn test_rejects_empty_inputs() {
        let config = SeatingConfig::default();
        assert!(matches!(
            validate(&snapshot(3, &[], &[]), &config),
            Err(SeatingError::NoTables)
        ));
        assert!(matches!(
            validate(&snapshot(0, &[(1, 4)], &[]), &config),
            Err(SeatingError::NoGuests)
        ));
    }

    #[test]
    fn test_rejects_more_guests_than_seats() {
        let err = validate(&snapshot(5, &[(1, 4)], &[]), &SeatingConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SeatingError::CapacityExceeded { guests: 5, seats: 4 }
        ));
        assert!(err.is_validation());
    }

    #[test]
    fn test_low_occupancy_boundary() {
        let config = SeatingConfig::default();
        // 7 of 10 is exactly 70%: not low
        let ok = validate(&snapshot(7, &[(1, 6), (2, 4)], &[]), &config).unwrap();
        assert!(!ok.low_occupancy);

        let low = validate(&snapshot(6, &[(1, 6), (2, 4)], &[]), &config).unwrap();
        assert!(low.low_occupancy);
        assert_eq!((low.guests, low.seats), (6, 10));
    }

    #[test]
    fn test_low_occupancy_logs_warning() {
        let config = SeatingConfig::default();

        let (low, logs) =
            with_captured_logs(|| validate(&snapshot(6, &[(1, 6), (2, 4)], &[]), &config));
        assert!(low.unwrap().low_occupancy);
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("6 guests for 10 seats"), "{logs}");

        let (full, logs) =
            with_captured_logs(|| validate(&snapshot(7, &[(1, 6), (2, 4)], &[]), &config));
        assert!(!full.unwrap().low_occupancy);
        assert!(logs.is_empty(), "{logs}");
    }
}
