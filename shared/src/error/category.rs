//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Guest errors
/// - 2xxx: Table errors
/// - 3xxx: Connection errors
/// - 4xxx: Seating errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Guest errors (1xxx)
    Guest,
    /// Table errors (2xxx)
    Table,
    /// Connection errors (3xxx)
    Connection,
    /// Seating engine errors (4xxx)
    Seating,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Guest,
            2000..3000 => Self::Table,
            3000..4000 => Self::Connection,
            4000..5000 => Self::Seating,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Guest);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Table);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Connection);
        assert_eq!(ErrorCategory::from_code(4003), ErrorCategory::Seating);
        assert_eq!(ErrorCategory::from_code(7000), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9002), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::GuestNotFound.category(), ErrorCategory::Guest);
        assert_eq!(ErrorCode::TableHasGuests.category(), ErrorCategory::Table);
        assert_eq!(
            ErrorCode::ConnectionSelfLink.category(),
            ErrorCategory::Connection
        );
        assert_eq!(ErrorCode::CapacityExceeded.category(), ErrorCategory::Seating);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Seating).unwrap();
        assert_eq!(json, "\"seating\"");

        let category: ErrorCategory = serde_json::from_str("\"connection\"").unwrap();
        assert_eq!(category, ErrorCategory::Connection);
    }
}
