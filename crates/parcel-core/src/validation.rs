//! # Validation Module
//!
//! Input validation for data entering a package and for configuration.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller input                                                 │
//! │  └── THIS MODULE: label/format checks → ValidationError                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Lifecycle state                                              │
//! │  └── PackageState permission table → Outcome::Rejected                 │
//! │                                                                         │
//! │  A valid item can still be rejected by the state it reaches.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing_subscriber::EnvFilter;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound accepted for `items.max_label_len`.
pub const MAX_LABEL_LEN_LIMIT: usize = 10_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item label and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must not exceed `max_len` characters
///
/// ## Example
/// ```rust
/// use parcel_core::validation::validate_item_label;
///
/// assert_eq!(validate_item_label(" book ", 50).unwrap(), "book");
/// assert!(validate_item_label("", 50).is_err());
/// assert!(validate_item_label(&"A".repeat(100), 50).is_err());
/// ```
pub fn validate_item_label(label: &str, max_len: usize) -> ValidationResult<String> {
    let label = label.trim();

    if label.is_empty() {
        return Err(ValidationError::Required {
            field: "label".to_string(),
        });
    }

    if label.chars().count() > max_len {
        return Err(ValidationError::TooLong {
            field: "label".to_string(),
            max: max_len,
        });
    }

    Ok(label.to_string())
}

/// Validates a tracing filter directive such as `"info,parcel=debug"`.
pub fn validate_log_filter(filter: &str) -> ValidationResult<()> {
    if filter.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "logging.filter".to_string(),
        });
    }

    EnvFilter::try_new(filter).map_err(|e| ValidationError::InvalidFormat {
        field: "logging.filter".to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the configured maximum label length.
///
/// ## Rules
/// - Must be between 1 and [`MAX_LABEL_LEN_LIMIT`]
pub fn validate_max_label_len(max_len: usize) -> ValidationResult<()> {
    if max_len == 0 || max_len > MAX_LABEL_LEN_LIMIT {
        return Err(ValidationError::OutOfRange {
            field: "items.max_label_len".to_string(),
            min: 1,
            max: MAX_LABEL_LEN_LIMIT as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
