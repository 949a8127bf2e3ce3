//! # Domain Types
//!
//! Value types shared by the package and its lifecycle states.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   PackageId     │   │      Item       │   │    Outcome      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  opaque string  │   │  id (UUID)      │   │  Applied        │       │
//! │  │  immutable      │   │  label          │   │  Rejected(why)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │   Operation     │   Names the five lifecycle operations for          │
//! │  │  ─────────────  │   permission checks and structured logs.          │
//! │  │  AddItem ...    │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::config::ItemSettings;
use crate::error::{Rejection, ValidationError};
use crate::validation::validate_item_label;

// =============================================================================
// Package Identifier
// =============================================================================

/// Opaque package identifier, fixed at creation.
///
/// Callers may use order numbers, tracking codes or plain integers; the
/// state machine never interprets the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PackageId(String);

impl PackageId {
    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(id: &str) -> Self {
        PackageId(id.to_string())
    }
}

impl From<String> for PackageId {
    fn from(id: String) -> Self {
        PackageId(id)
    }
}

impl From<u64> for PackageId {
    fn from(id: u64) -> Self {
        PackageId(id.to_string())
    }
}

// =============================================================================
// Item
// =============================================================================

/// Something placed into a package.
///
/// Items have no lifecycle of their own. Adding an item moves it into the
/// package; if the add is rejected the item is dropped, so clone it first
/// when the caller still needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// What the item is, as entered by the caller.
    pub label: String,
}

impl Item {
    /// Creates an item with a fresh id. The label is taken as-is.
    pub fn new(label: impl Into<String>) -> Self {
        Item {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
        }
    }

    /// Validates user input and builds an item from it.
    ///
    /// ## Rules
    /// - Label is trimmed
    /// - Must not be empty
    /// - Must not exceed `settings.max_label_len` characters
    ///
    /// ## Example
    /// ```rust
    /// use parcel_core::config::ItemSettings;
    /// use parcel_core::Item;
    ///
    /// let settings = ItemSettings::default();
    /// let item = Item::parse("  book ", &settings).unwrap();
    /// assert_eq!(item.label, "book");
    /// assert!(Item::parse("   ", &settings).is_err());
    /// ```
    pub fn parse(label: &str, settings: &ItemSettings) -> Result<Self, ValidationError> {
        let label = validate_item_label(label, settings.max_label_len)?;
        Ok(Item::new(label))
    }
}

impl From<&str> for Item {
    fn from(label: &str) -> Self {
        Item::new(label)
    }
}

impl From<String> for Item {
    fn from(label: String) -> Self {
        Item::new(label)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

// =============================================================================
// Operation
// =============================================================================

/// The lifecycle operations every state must answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Put an item into the package.
    AddItem,
    /// Inspect the package contents.
    ReviewPackage,
    /// Enter or replace the shipping address.
    EnterShippingInfo,
    /// Stop blocking the seller's payment.
    ProcessPayment,
    /// Mark the package as delivered.
    Delivered,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 5] = [
        Operation::AddItem,
        Operation::ReviewPackage,
        Operation::EnterShippingInfo,
        Operation::ProcessPayment,
        Operation::Delivered,
    ];

    /// Whether the operation changes package contents or logistics.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Operation::ReviewPackage)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::AddItem => write!(f, "add_item"),
            Operation::ReviewPackage => write!(f, "review_package"),
            Operation::EnterShippingInfo => write!(f, "enter_shipping_info"),
            Operation::ProcessPayment => write!(f, "process_payment"),
            Operation::Delivered => write!(f, "delivered"),
        }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// Result of a lifecycle operation.
///
/// The call itself always succeeds; `Outcome` says whether the underlying
/// domain action happened.
///
/// ## Caller Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Payment subsystem                                                      │
/// │                                                                         │
/// │  package.process_payment()                                              │
/// │       │                                                                 │
/// │       ├── Applied            → release funds to the seller             │
/// │       │                                                                 │
/// │       └── Rejected(reason)   → keep funds blocked, surface reason      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
#[must_use = "an Outcome reports whether the operation actually took effect"]
pub enum Outcome {
    /// The domain action took effect.
    Applied,
    /// The current state refused the action; nothing changed.
    Rejected(Rejection),
}

impl Outcome {
    /// Returns true if the action took effect.
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    /// Returns true if the action was refused.
    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// The rejection reason, if any.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Applied => None,
            Outcome::Rejected(reason) => Some(*reason),
        }
    }

    /// Converts into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            Outcome::Applied => Ok(()),
            Outcome::Rejected(reason) => Err(reason),
        }
    }
}

impl From<Result<(), Rejection>> for Outcome {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Outcome::Applied,
            Err(reason) => Outcome::Rejected(reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => write!(f, "applied"),
            Outcome::Rejected(reason) => write!(f, "rejected: {}", reason),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_id_conversions() {
        assert_eq!(PackageId::from("123").as_str(), "123");
        assert_eq!(PackageId::from(456_u64).to_string(), "456");
        assert_eq!(PackageId::from("789".to_string()), PackageId::from(789_u64));
    }

    #[test]
    fn test_item_from_label_gets_unique_id() {
        let a = Item::from("book");
        let b = Item::from("book");
        assert_eq!(a.label, "book");
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_item_parse_enforces_settings() {
        let settings = ItemSettings { max_label_len: 5 };
        assert_eq!(Item::parse(" pen ", &settings).unwrap().label, "pen");
        assert!(matches!(
            Item::parse("notebook", &settings),
            Err(ValidationError::TooLong { max: 5, .. })
        ));
        assert!(matches!(
            Item::parse("", &settings),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_operation_mutation_flag() {
        let mutations: Vec<_> = Operation::ALL.iter().filter(|op| op.is_mutation()).collect();
        assert_eq!(mutations.len(), 4);
        assert!(!Operation::ReviewPackage.is_mutation());
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(Outcome::Applied.is_applied());
        assert_eq!(Outcome::Applied.rejection(), None);

        let rejected = Outcome::Rejected(Rejection::NotConfirmed);
        assert!(rejected.is_rejected());
        assert_eq!(rejected.rejection(), Some(Rejection::NotConfirmed));
        assert_eq!(rejected.into_result(), Err(Rejection::NotConfirmed));
        assert_eq!(rejected.to_string(), "rejected: not confirmed yet");
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(Outcome::from(Ok(())), Outcome::Applied);
        assert_eq!(
            Outcome::from(Err(Rejection::Cancelled)),
            Outcome::Rejected(Rejection::Cancelled)
        );
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(Outcome::Rejected(Rejection::InTransit)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "rejected", "reason": "in_transit" })
        );

        let json = serde_json::to_value(Outcome::Applied).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "applied" }));
    }
}
