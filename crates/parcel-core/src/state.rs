//! # Package Lifecycle States
//!
//! Each state decides which lifecycle operations it permits and applies the
//! effect of the ones it does.
//!
//! ## Permission Table
//! ```text
//! ┌──────────────────────┬────────────┬────────────┬────────────┬────────────┐
//! │ operation            │ PROCESSING │ IN_TRANSIT │ DELIVERED  │ CANCELLED  │
//! ├──────────────────────┼────────────┼────────────┼────────────┼────────────┤
//! │ add_item             │ applied    │ in transit │ delivered  │ cancelled  │
//! │ enter_shipping_info  │ applied    │ in transit │ delivered  │ cancelled  │
//! │ process_payment      │ applied    │ in transit │ delivered  │ cancelled  │
//! │ delivered            │ not conf.  │ applied    │ delivered  │ cancelled  │
//! │ review_package       │ applied    │ applied    │ applied    │ applied    │
//! └──────────────────────┴────────────┴────────────┴────────────┴────────────┘
//! ```
//!
//! ## Transitions
//! ```text
//! PROCESSING ──set_state──▶ IN_TRANSIT ──set_state──▶ DELIVERED
//!      ▲                        │
//!      └───────set_state────────┘          any ──set_state──▶ CANCELLED
//! ```
//! Transitions are caller-driven only. No operation moves a package to
//! another state, and [`Package::set_state`] accepts any target: the
//! shipping subsystem owns the decision of when a package advances.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::Rejection;
use crate::package::Package;
use crate::types::{Item, Operation, Outcome};

// =============================================================================
// Package State
// =============================================================================

/// The lifecycle state of a package.
///
/// States hold no per-package data; everything they change lives on the
/// [`Package`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PackageState {
    /// Being assembled; not yet confirmed for shipping.
    #[default]
    Processing,
    /// Confirmed and travelling to its destination.
    InTransit,
    /// Handed over to the recipient.
    Delivered,
    /// Withdrawn before delivery.
    Cancelled,
}

impl PackageState {
    /// Every state, in lifecycle order.
    pub const ALL: [PackageState; 4] = [
        PackageState::Processing,
        PackageState::InTransit,
        PackageState::Delivered,
        PackageState::Cancelled,
    ];

    /// Whether no further change is expected in this state.
    pub fn is_final(&self) -> bool {
        matches!(self, PackageState::Delivered | PackageState::Cancelled)
    }

    /// Checks whether `operation` is permitted in this state.
    pub fn permits(&self, operation: Operation) -> Result<(), Rejection> {
        match (self, operation) {
            (_, Operation::ReviewPackage) => Ok(()),
            (PackageState::Processing, Operation::Delivered) => Err(Rejection::NotConfirmed),
            (PackageState::Processing, _) => Ok(()),
            (PackageState::InTransit, Operation::Delivered) => Ok(()),
            (PackageState::InTransit, _) => Err(Rejection::InTransit),
            (PackageState::Delivered, _) => Err(Rejection::AlreadyDelivered),
            (PackageState::Cancelled, _) => Err(Rejection::Cancelled),
        }
    }

    // =========================================================================
    // Operation Handlers
    // =========================================================================

    pub(crate) fn add_item(self, package: &mut Package, item: Item) -> Outcome {
        self.handle(Operation::AddItem, package, |package| package.push_item(item))
    }

    pub(crate) fn review_package(self, package: &mut Package) -> Outcome {
        self.handle(Operation::ReviewPackage, package, Package::record_review)
    }

    pub(crate) fn enter_shipping_info(self, package: &mut Package, info: String) -> Outcome {
        self.handle(Operation::EnterShippingInfo, package, |package| {
            package.store_shipping_info(info)
        })
    }

    pub(crate) fn process_payment(self, package: &mut Package) -> Outcome {
        self.handle(Operation::ProcessPayment, package, Package::release_payment)
    }

    /// Marks delivery. Does not move the package to [`PackageState::Delivered`].
    pub(crate) fn delivered(self, package: &mut Package) -> Outcome {
        self.handle(Operation::Delivered, package, Package::record_delivery)
    }

    /// Applies `effect` only when the operation is permitted.
    fn handle<F>(self, operation: Operation, package: &mut Package, effect: F) -> Outcome
    where
        F: FnOnce(&mut Package),
    {
        match self.permits(operation) {
            Ok(()) => {
                effect(package);
                Outcome::Applied
            }
            Err(reason) => Outcome::Rejected(reason),
        }
    }
}

impl fmt::Display for PackageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PackageState::Processing => "PROCESSING",
            PackageState::InTransit => "IN_TRANSIT",
            PackageState::Delivered => "DELIVERED",
            PackageState::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
