//! Seating assignment and report models

use serde::{Deserialize, Serialize};

/// One guest placed at one seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub guest_id: i64,
    pub table_id: i64,
    pub seat_position: u32,
}

/// Guest line in a table report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatedGuest {
    pub id: i64,
    pub name: String,
    pub seat_position: u32,
    pub dietary_tags: Vec<String>,
}

/// Per-table report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSeating {
    pub id: i64,
    pub name: String,
    pub guests: Vec<SeatedGuest>,
    /// "used/total"
    pub occupancy: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingStats {
    pub guests_assigned: usize,
    pub tables_used: usize,
    /// Positive/neutral links whose guests share a table
    pub connections_satisfied: usize,
    /// Negative links whose guests are at different tables
    pub conflicts_resolved: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingSummary {
    pub tables: Vec<TableSeating>,
    pub stats: SeatingStats,
}

/// Response of the generate operation
///
/// ```json
/// { "success": true, "message": "...", "data": { "tables": [...], "stats": {...} } }
/// { "success": false, "message": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SeatingSummary>,
}

impl GenerateResponse {
    pub fn ok(message: impl Into<String>, data: SeatingSummary) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
