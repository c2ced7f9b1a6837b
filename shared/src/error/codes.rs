//! Unified error codes for the seating planner
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Guest errors
//! - 2xxx: Table errors
//! - 3xxx: Connection errors
//! - 4xxx: Seating errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Resource already exists
    AlreadyExists = 4,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Guest ====================
    /// Guest not found
    GuestNotFound = 1001,

    // ==================== 2xxx: Table ====================
    /// Table not found
    TableNotFound = 2001,
    /// Table still has seated guests
    TableHasGuests = 2002,
    /// Seat count outside the allowed range
    TableCapacityInvalid = 2003,
    /// Shape/dimensions cannot host the seat count
    TableDimensionsInvalid = 2004,
    /// New capacity is lower than the number of seated guests
    TableCapacityBelowSeated = 2005,

    // ==================== 3xxx: Connection ====================
    /// Connection not found
    ConnectionNotFound = 3001,
    /// A guest cannot be linked to itself
    ConnectionSelfLink = 3002,

    // ==================== 4xxx: Seating ====================
    /// No table available
    NoTables = 4001,
    /// No guest to seat
    NoGuests = 4002,
    /// More guests than seats
    CapacityExceeded = 4003,
    /// Assignment write-back failed and was rolled back
    AssignmentPersistFailed = 4004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Guest
            ErrorCode::GuestNotFound => "Guest not found",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableHasGuests => "Table has seated guests",
            ErrorCode::TableCapacityInvalid => "Seat count must be between 2 and 20",
            ErrorCode::TableDimensionsInvalid => "Table dimensions are too small for its seats",
            ErrorCode::TableCapacityBelowSeated => {
                "Seat count is lower than the guests already seated"
            }

            // Connection
            ErrorCode::ConnectionNotFound => "Connection not found",
            ErrorCode::ConnectionSelfLink => "A guest cannot be linked to itself",

            // Seating
            ErrorCode::NoTables => "No tables available",
            ErrorCode::NoGuests => "No guests to seat",
            ErrorCode::CapacityExceeded => "Not enough seats for all guests",
            ErrorCode::AssignmentPersistFailed => "Failed to save seating assignments",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            4 => Ok(ErrorCode::AlreadyExists),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Guest
            1001 => Ok(ErrorCode::GuestNotFound),

            // Table
            2001 => Ok(ErrorCode::TableNotFound),
            2002 => Ok(ErrorCode::TableHasGuests),
            2003 => Ok(ErrorCode::TableCapacityInvalid),
            2004 => Ok(ErrorCode::TableDimensionsInvalid),
            2005 => Ok(ErrorCode::TableCapacityBelowSeated),

            // Connection
            3001 => Ok(ErrorCode::ConnectionNotFound),
            3002 => Ok(ErrorCode::ConnectionSelfLink),

            // Seating
            4001 => Ok(ErrorCode::NoTables),
            4002 => Ok(ErrorCode::NoGuests),
            4003 => Ok(ErrorCode::CapacityExceeded),
            4004 => Ok(ErrorCode::AssignmentPersistFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
