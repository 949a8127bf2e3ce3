//! # Package
//!
//! The context of the lifecycle state machine: it owns identity, contents
//! and exactly one [`PackageState`], and forwards every lifecycle operation
//! to that state.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Operation Dispatch                               │
//! │                                                                         │
//! │  caller ──► package.add_item(item)                                      │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │             state.add_item(package, item)                               │
//! │                   │                                                     │
//! │                   ├── permitted → push item       → Outcome::Applied    │
//! │                   │                                                     │
//! │                   └── refused   → nothing changes → Outcome::Rejected   │
//! │                                                                         │
//! │  caller ──► package.set_state(InTransit)   (the ONLY way state moves)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The current state is deliberately not exposed. Callers learn what a
//! package permits from the outcomes of its operations.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::state::PackageState;
use crate::types::{Item, Operation, Outcome, PackageId};

/// A package moving through its lifecycle.
///
/// ## Invariants
/// - `id` never changes after creation
/// - there is always exactly one current state (starts as Processing)
/// - a rejected operation changes nothing
#[derive(Clone)]
pub struct Package {
    id: PackageId,
    items: Vec<Item>,
    shipping_info: Option<String>,
    state: PackageState,
    created_at: DateTime<Utc>,
    payment_released_at: Option<DateTime<Utc>>,
    delivered_at: Option<DateTime<Utc>>,
    last_reviewed_at: Option<DateTime<Utc>>,
}

impl Package {
    /// Creates an empty package in the Processing state.
    ///
    /// ## Example
    /// ```rust
    /// use parcel_core::{Package, PackageState, Outcome, Rejection};
    ///
    /// let mut package = Package::new("123");
    /// assert_eq!(package.add_item("book"), Outcome::Applied);
    ///
    /// package.set_state(PackageState::InTransit);
    /// assert_eq!(
    ///     package.add_item("pen"),
    ///     Outcome::Rejected(Rejection::InTransit)
    /// );
    /// assert_eq!(package.mark_delivered(), Outcome::Applied);
    /// ```
    pub fn new(id: impl Into<PackageId>) -> Self {
        let id = id.into();
        debug!(package_id = %id, "Creating package");

        Package {
            id,
            items: Vec::new(),
            shipping_info: None,
            state: PackageState::default(),
            created_at: Utc::now(),
            payment_released_at: None,
            delivered_at: None,
            last_reviewed_at: None,
        }
    }

    /// Replaces the current state.
    ///
    /// Any state may follow any other; repeating the same call has no
    /// further effect.
    pub fn set_state(&mut self, state: PackageState) {
        if self.state == state {
            debug!(package_id = %self.id, state = %state, "Package already in requested state");
            return;
        }

        info!(package_id = %self.id, from = %self.state, to = %state, "Package state replaced");
        self.state = state;
    }

    // =========================================================================
    // Lifecycle Operations
    // =========================================================================

    /// Moves an item into the package.
    pub fn add_item(&mut self, item: impl Into<Item>) -> Outcome {
        let item = item.into();
        self.dispatch(Operation::AddItem, |state, package| {
            state.add_item(package, item)
        })
    }

    /// Enters (or replaces) the shipping information.
    pub fn enter_shipping_info(&mut self, info: impl Into<String>) -> Outcome {
        let info = info.into();
        self.dispatch(Operation::EnterShippingInfo, |state, package| {
            state.enter_shipping_info(package, info)
        })
    }

    /// Stops blocking the seller's payment.
    pub fn process_payment(&mut self) -> Outcome {
        self.dispatch(Operation::ProcessPayment, PackageState::process_payment)
    }

    /// Marks the package as delivered.
    ///
    /// An applied delivery is recorded but does not move the package to
    /// [`PackageState::Delivered`]; call [`set_state`](Self::set_state) for that.
    pub fn mark_delivered(&mut self) -> Outcome {
        self.dispatch(Operation::Delivered, PackageState::delivered)
    }

    /// Reviews the package contents.
    pub fn review_package(&mut self) -> Outcome {
        self.dispatch(Operation::ReviewPackage, PackageState::review_package)
    }

    fn dispatch<F>(&mut self, operation: Operation, handler: F) -> Outcome
    where
        F: FnOnce(PackageState, &mut Package) -> Outcome,
    {
        let state = self.state;
        debug!(package_id = %self.id, state = %state, operation = %operation, "Dispatching");

        let outcome = handler(state, self);
        if let Outcome::Rejected(reason) = outcome {
            debug!(
                package_id = %self.id,
                state = %state,
                operation = %operation,
                reason = %reason,
                "Operation rejected"
            );
        }
        outcome
    }

    // =========================================================================
    // Effects (called by state handlers once an operation is permitted)
    // =========================================================================

    pub(crate) fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub(crate) fn store_shipping_info(&mut self, info: String) {
        self.shipping_info = Some(info);
    }

    pub(crate) fn release_payment(&mut self) {
        self.payment_released_at.get_or_insert_with(Utc::now);
    }

    pub(crate) fn record_delivery(&mut self) {
        self.delivered_at.get_or_insert_with(Utc::now);
    }

    pub(crate) fn record_review(&mut self) {
        debug!(
            package_id = %self.id,
            items = self.items.len(),
            has_shipping_info = self.shipping_info.is_some(),
            "Package reviewed"
        );
        self.last_reviewed_at = Some(Utc::now());
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The package identifier.
    pub fn id(&self) -> &PackageId {
        &self.id
    }

    /// Items in the order they were added.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The last shipping information entered, if any.
    pub fn shipping_info(&self) -> Option<&str> {
        self.shipping_info.as_deref()
    }

    /// When the package was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When payment was first released.
    pub fn payment_released_at(&self) -> Option<DateTime<Utc>> {
        self.payment_released_at
    }

    /// When delivery was first recorded.
    pub fn delivered_at(&self) -> Option<DateTime<Utc>> {
        self.delivered_at
    }

    /// When the package was last reviewed.
    pub fn last_reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.last_reviewed_at
    }
}

/// Leaves out the current state: it is only observable through outcomes.
impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("id", &self.id)
            .field("items", &self.items)
            .field("shipping_info", &self.shipping_info)
            .field("created_at", &self.created_at)
            .field("payment_released_at", &self.payment_released_at)
            .field("delivered_at", &self.delivered_at)
            .field("last_reviewed_at", &self.last_reviewed_at)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rejection;

    #[test]
    fn test_new_package_is_empty_and_processing() {
        let package = Package::new("123");
        assert_eq!(package.id().as_str(), "123");
        assert!(package.items().is_empty());
        assert_eq!(package.shipping_info(), None);
        assert_eq!(package.state, PackageState::Processing);
        assert!(package.payment_released_at().is_none());
        assert!(package.delivered_at().is_none());
    }

    #[test]
    fn test_processing_applies_mutations() {
        let mut package = Package::new("p-1");

        assert_eq!(package.add_item("book"), Outcome::Applied);
        assert_eq!(package.add_item("lamp"), Outcome::Applied);
        assert_eq!(package.enter_shipping_info("1 Main St"), Outcome::Applied);
        assert_eq!(package.enter_shipping_info("2 Side St"), Outcome::Applied);
        assert_eq!(package.process_payment(), Outcome::Applied);

        let labels: Vec<_> = package.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["book", "lamp"]);
        assert_eq!(package.shipping_info(), Some("2 Side St"));
        assert!(package.payment_released_at().is_some());
    }

    #[test]
    fn test_processing_rejects_delivery() {
        let mut package = Package::new("p-2");
        assert_eq!(
            package.mark_delivered(),
            Outcome::Rejected(Rejection::NotConfirmed)
        );
        assert!(package.delivered_at().is_none());
    }

    #[test]
    fn test_in_transit_locks_contents() {
        let mut package = Package::new("p-3");
        let _ = package.add_item("book");
        let _ = package.enter_shipping_info("1 Main St");
        package.set_state(PackageState::InTransit);

        let rejected = Outcome::Rejected(Rejection::InTransit);
        assert_eq!(package.add_item("pen"), rejected);
        assert_eq!(package.enter_shipping_info("elsewhere"), rejected);
        assert_eq!(package.process_payment(), rejected);

        assert_eq!(package.items().len(), 1);
        assert_eq!(package.shipping_info(), Some("1 Main St"));
        assert!(package.payment_released_at().is_none());
    }

    #[test]
    fn test_delivery_does_not_advance_state() {
        let mut package = Package::new("p-4");
        package.set_state(PackageState::InTransit);

        assert_eq!(package.mark_delivered(), Outcome::Applied);
        assert_eq!(package.state, PackageState::InTransit);

        let first = package.delivered_at();
        assert!(first.is_some());
        assert_eq!(package.mark_delivered(), Outcome::Applied);
        assert_eq!(package.delivered_at(), first);
    }

    #[test]
    fn test_payment_release_keeps_first_timestamp() {
        let mut package = Package::new("p-5");
        let _ = package.process_payment();
        let first = package.payment_released_at();
        let _ = package.process_payment();
        assert_eq!(package.payment_released_at(), first);
    }

    #[test]
    fn test_set_state_is_idempotent() {
        let mut once = Package::new("p-6");
        once.set_state(PackageState::InTransit);

        let mut twice = Package::new("p-6");
        twice.set_state(PackageState::InTransit);
        twice.set_state(PackageState::InTransit);

        assert_eq!(once.state, twice.state);
        assert_eq!(once.add_item("x"), twice.add_item("x"));
        assert_eq!(once.mark_delivered(), twice.mark_delivered());
    }

    #[test]
    fn test_review_records_timestamp_in_every_state() {
        for state in PackageState::ALL {
            let mut package = Package::new("p-7");
            package.set_state(state);
            assert_eq!(package.review_package(), Outcome::Applied, "{state}");
            assert!(package.last_reviewed_at().is_some());
        }
    }

    #[test]
    fn test_debug_output_omits_state() {
        let mut package = Package::new("123");
        let _ = package.add_item("book");
        package.set_state(PackageState::InTransit);

        let debug = format!("{package:?}");
        assert!(debug.contains("\"123\""));
        assert!(debug.contains("book"));
        assert!(!debug.contains("InTransit"));
        assert!(!debug.contains("state:"));
    }

    #[test]
    fn test_cancelled_rejects_everything_but_review() {
        let mut package = Package::new("p-8");
        package.set_state(PackageState::Cancelled);

        let rejected = Outcome::Rejected(Rejection::Cancelled);
        assert_eq!(package.add_item("x"), rejected);
        assert_eq!(package.enter_shipping_info("x"), rejected);
        assert_eq!(package.process_payment(), rejected);
        assert_eq!(package.mark_delivered(), rejected);
        assert_eq!(package.review_package(), Outcome::Applied);
    }
}
