//! Unified error system for the seating planner
//!
//! This module provides a comprehensive error handling system with:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Guest errors
//! - 2xxx: Table errors
//! - 3xxx: Connection errors
//! - 4xxx: Seating errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::TableNotFound);
//!
//! // Create an error with custom message and details
//! let err = AppError::with_message(ErrorCode::CapacityExceeded, "5 guests for 4 seats")
//!     .with_detail("guests", 5);
//!
//! // Convert to API response
//! let response: ApiResponse<()> = err.into();
//! assert_eq!(response.code, Some(4003));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
