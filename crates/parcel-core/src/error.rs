//! # Error Types
//!
//! Rejection reasons and error types for parcel-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Expected business outcomes (NOT errors)                               │
//! │  └── Rejection        - Operation not permitted in current state       │
//! │                         carried inside Outcome::Rejected               │
//! │                                                                         │
//! │  Real errors (returned as Err)                                         │
//! │  ├── CoreError        - Config file / validation failures              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. A lifecycle operation never returns `Err`; a refusal is a `Rejection`
//! 3. Errors are enum variants, never String
//! 4. The `Display` of a `Rejection` is the human-readable reason

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Rejection
// =============================================================================

/// Why a lifecycle operation was refused by the current state.
///
/// ## When This Occurs
/// ```text
/// Package (InTransit)
///      │
///      ▼
/// add_item("pen")
///      │
///      ▼
/// InTransit handler: contents are locked
///      │
///      ▼
/// Outcome::Rejected(Rejection::InTransit)
///      │
///      ▼
/// Caller shows: "package already in transit"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The package has not been confirmed for shipping, so it cannot be
    /// marked as delivered.
    #[error("not confirmed yet")]
    NotConfirmed,

    /// Contents and logistics are locked once the package ships.
    #[error("package already in transit")]
    InTransit,

    /// Nothing can change after delivery.
    #[error("package already delivered")]
    AlreadyDelivered,

    /// A cancelled package accepts no further changes.
    #[error("package cancelled")]
    Cancelled,
}

// =============================================================================
// Core Error
// =============================================================================

/// General errors outside the state machine itself.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Config file is not valid TOML for [`LifecycleConfig`](crate::config::LifecycleConfig).
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before data reaches a package, e.g. when building an
/// [`Item`](crate::types::Item) from user input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(Rejection::NotConfirmed.to_string(), "not confirmed yet");
        assert_eq!(Rejection::InTransit.to_string(), "package already in transit");
        assert_eq!(
            Rejection::AlreadyDelivered.to_string(),
            "package already delivered"
        );
        assert_eq!(Rejection::Cancelled.to_string(), "package cancelled");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "label".to_string(),
        };
        assert_eq!(err.to_string(), "label is required");

        let err = ValidationError::TooLong {
            field: "label".to_string(),
            max: 10,
        };
        assert_eq!(err.to_string(), "label must be at most 10 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "label".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_config_load_errors_are_typed() {
        fn kind(err: &CoreError) -> &'static str {
            match err {
                CoreError::ConfigRead(_) => "read",
                CoreError::ConfigParse(_) => "parse",
                CoreError::Validation(_) => "validation",
            }
        }

        let parse_err = toml::from_str::<crate::config::LifecycleConfig>("items = 3").unwrap_err();
        assert_eq!(kind(&CoreError::from(parse_err)), "parse");

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(kind(&CoreError::from(io_err)), "read");
    }

    #[test]
    fn test_rejection_serializes_snake_case() {
        let json = serde_json::to_string(&Rejection::InTransit).unwrap();
        assert_eq!(json, "\"in_transit\"");
    }
}
