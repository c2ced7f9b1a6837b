//! Guest Connection Model
//!
//! A connection links two guests with a seating preference. Pairs are
//! unordered and always stored smaller id first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seating preference between two guests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    /// Must sit together
    #[serde(alias = "green")]
    Positive,
    #[serde(alias = "yellow")]
    Neutral,
    /// Must not sit together
    #[serde(alias = "red")]
    Negative,
}

impl ConnectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Positive => "positive",
            ConnectionType::Neutral => "neutral",
            ConnectionType::Negative => "negative",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" | "green" => Ok(ConnectionType::Positive),
            "neutral" | "yellow" => Ok(ConnectionType::Neutral),
            "negative" | "red" => Ok(ConnectionType::Negative),
            other => Err(format!("Unknown connection type: {other}")),
        }
    }
}

/// Connection entity (collegamento)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub guest_a: i64,
    pub guest_b: i64,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
}

impl Connection {
    /// Build a connection with the pair in canonical order
    pub fn new(x: i64, y: i64, kind: ConnectionType) -> Self {
        let (guest_a, guest_b) = canonical_pair(x, y);
        Self {
            guest_a,
            guest_b,
            kind,
        }
    }

    pub fn involves(&self, guest_id: i64) -> bool {
        self.guest_a == guest_id || self.guest_b == guest_id
    }
}

/// Order a pair smaller id first
pub fn canonical_pair(x: i64, y: i64) -> (i64, i64) {
    if x <= y { (x, y) } else { (y, x) }
}

/// Create or change a connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionUpsert {
    pub guest_a: i64,
    pub guest_b: i64,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
}

/// Connection list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionQuery {
    pub guest_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canonicalizes_pair() {
        let c = Connection::new(9, 3, ConnectionType::Negative);
        assert_eq!((c.guest_a, c.guest_b), (3, 9));
        assert!(c.involves(9));
        assert!(!c.involves(4));
    }

    #[test]
    fn test_legacy_color_aliases() {
        let up: ConnectionUpsert =
            serde_json::from_str(r#"{"guest_a":1,"guest_b":2,"type":"red"}"#).unwrap();
        assert_eq!(up.kind, ConnectionType::Negative);
        assert_eq!("green".parse::<ConnectionType>(), Ok(ConnectionType::Positive));
        assert!("blue".parse::<ConnectionType>().is_err());
    }

    #[test]
    fn test_serializes_type_field() {
        let c = Connection::new(1, 2, ConnectionType::Neutral);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"guest_a":1,"guest_b":2,"type":"neutral"}"#);
    }
}
