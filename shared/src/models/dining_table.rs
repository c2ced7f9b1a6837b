//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table shape with its dimensions in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableShape {
    Round { diameter_cm: u32 },
    Rectangular { length_cm: u32, width_cm: u32 },
}

impl TableShape {
    /// Usable perimeter in centimetres
    pub fn perimeter_cm(&self) -> f64 {
        match *self {
            TableShape::Round { diameter_cm } => std::f64::consts::PI * diameter_cm as f64,
            TableShape::Rectangular {
                length_cm,
                width_cm,
            } => 2.0 * (length_cm as f64 + width_cm as f64),
        }
    }

    /// Minimum elbow room per guest
    pub fn min_space_per_seat_cm(&self) -> f64 {
        match self {
            TableShape::Round { .. } => 60.0,
            TableShape::Rectangular { .. } => 50.0,
        }
    }
}

/// Dining table entity (tavolo)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    /// Total seat count
    pub capacity: u32,
    pub shape: TableShape,
    /// Canvas position
    pub position_x: i32,
    pub position_y: i32,
    /// Head table (capotavola)
    pub head_table: bool,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub name: String,
    pub capacity: u32,
    pub shape: TableShape,
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
    pub head_table: Option<bool>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub name: Option<String>,
    pub capacity: Option<u32>,
    pub shape: Option<TableShape>,
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
    pub head_table: Option<bool>,
}
