//! Guest Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A guest's seat: table and 1-based position, always set together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub table_id: i64,
    pub position: u32,
}

/// Guest entity (invitato)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Dietary restriction tags (sorted, unique)
    #[serde(default)]
    pub dietary_tags: BTreeSet<String>,
    /// Current seat, written only by the seating engine
    #[serde(default)]
    pub seat: Option<Seat>,
}

impl Guest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create guest payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestCreate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    /// Free text, comma separated ("other intolerances")
    #[serde(default)]
    pub other_dietary: Option<String>,
}

/// Update guest payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dietary_tags: Option<Vec<String>>,
    pub other_dietary: Option<String>,
}

/// Guest list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestQuery {
    /// Case-insensitive match on first or last name
    pub search: Option<String>,
    pub table_id: Option<i64>,
}

/// Merge tag list and comma separated free text into a normalized tag set
pub fn normalize_dietary_tags<'a>(tags: &'a [String], other: Option<&'a str>) -> BTreeSet<String> {
    tags.iter()
        .map(String::as_str)
        .chain(other.into_iter().flat_map(|s| s.split(',')))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dietary_tags_merges_and_dedupes() {
        let tags = vec!["gluten".to_string(), " lactose ".to_string(), String::new()];
        let set = normalize_dietary_tags(&tags, Some("nuts, gluten ,,shellfish"));
        let got: Vec<_> = set.into_iter().collect();
        assert_eq!(got, vec!["gluten", "lactose", "nuts", "shellfish"]);
    }

    #[test]
    fn test_guest_without_seat_deserializes() {
        let guest: Guest =
            serde_json::from_str(r#"{"id":1,"first_name":"Anna","last_name":"Rossi"}"#).unwrap();
        assert!(guest.seat.is_none());
        assert!(guest.dietary_tags.is_empty());
        assert_eq!(guest.full_name(), "Anna Rossi");
    }
}
