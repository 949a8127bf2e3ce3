//! # Shared Package
//!
//! Exclusive-access wrapper for hosts that touch one package from several
//! threads.
//!
//! ## Thread Safety
//! The package is wrapped in `Arc<Mutex<T>>` because:
//! 1. A payment worker and a shipping worker may hold the same package
//! 2. Dispatch reads the current state and then applies an effect; both
//!    must happen under one lock so a concurrent `set_state` cannot slip
//!    in between
//!
//! A plain [`Package`] needs none of this and stays the default.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::package::Package;
use crate::state::PackageState;
use crate::types::{Item, Outcome, PackageId};

/// A package behind a mutex. Clones share the same package.
#[derive(Debug, Clone)]
pub struct SharedPackage {
    package: Arc<Mutex<Package>>,
}

impl SharedPackage {
    /// Wraps an existing package.
    pub fn new(package: Package) -> Self {
        SharedPackage {
            package: Arc::new(Mutex::new(package)),
        }
    }

    /// Creates a fresh package and wraps it.
    pub fn create(id: impl Into<PackageId>) -> Self {
        Self::new(Package::new(id))
    }

    /// Executes a function with read access to the package.
    ///
    /// ## Usage
    /// ```rust
    /// # use parcel_core::SharedPackage;
    /// let shared = SharedPackage::create("123");
    /// let count = shared.with_package(|p| p.items().len());
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_package<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Package) -> R,
    {
        let package = self.lock();
        f(&package)
    }

    /// Executes a function with write access to the package.
    pub fn with_package_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Package) -> R,
    {
        let mut package = self.lock();
        f(&mut package)
    }

    /// Replaces the current state under the lock.
    pub fn set_state(&self, state: PackageState) {
        self.with_package_mut(|p| p.set_state(state));
    }

    /// Moves an item into the package.
    pub fn add_item(&self, item: impl Into<Item>) -> Outcome {
        let item = item.into();
        self.with_package_mut(|p| p.add_item(item))
    }

    /// Enters (or replaces) the shipping information.
    pub fn enter_shipping_info(&self, info: impl Into<String>) -> Outcome {
        let info = info.into();
        self.with_package_mut(|p| p.enter_shipping_info(info))
    }

    /// Stops blocking the seller's payment.
    pub fn process_payment(&self) -> Outcome {
        self.with_package_mut(Package::process_payment)
    }

    /// Marks the package as delivered without changing its state.
    pub fn mark_delivered(&self) -> Outcome {
        self.with_package_mut(Package::mark_delivered)
    }

    /// Reviews the package contents.
    pub fn review_package(&self) -> Outcome {
        self.with_package_mut(Package::review_package)
    }

    /// Every effect is a single field write, so a panic while the lock was
    /// held cannot leave the package half-updated.
    fn lock(&self) -> MutexGuard<'_, Package> {
        self.package.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Package mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl From<Package> for SharedPackage {
    fn from(package: Package) -> Self {
        SharedPackage::new(package)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::error::Rejection;

    #[test]
    fn test_clones_share_one_package() {
        let shared = SharedPackage::create("s-1");
        let other = shared.clone();

        assert_eq!(other.add_item("book"), Outcome::Applied);
        shared.set_state(PackageState::InTransit);

        assert_eq!(
            other.add_item("pen"),
            Outcome::Rejected(Rejection::InTransit)
        );
        assert_eq!(shared.with_package(|p| p.items().len()), 1);
    }

    #[test]
    fn test_concurrent_adds_are_all_recorded() {
        let shared = SharedPackage::create("s-2");

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let shared = shared.clone();
                thread::spawn(move || shared.add_item(format!("item-{n}")))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Outcome::Applied);
        }
        assert_eq!(shared.with_package(|p| p.items().len()), 8);
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let shared = SharedPackage::create("s-3");
        let poisoner = shared.clone();

        let _ = thread::spawn(move || {
            poisoner.with_package_mut(|_| panic!("worker crashed"));
        })
        .join();

        assert_eq!(shared.process_payment(), Outcome::Applied);
        assert!(shared.with_package(|p| p.payment_released_at().is_some()));
    }

    #[test]
    fn test_debug_output_omits_state() {
        let shared = SharedPackage::create("123");
        shared.set_state(PackageState::InTransit);

        let debug = format!("{shared:?}");
        assert!(debug.contains("\"123\""));
        assert!(!debug.contains("InTransit"));
    }

    #[test]
    fn test_forwarding_operations() {
        let shared = SharedPackage::from(Package::new("s-4"));
        assert_eq!(shared.enter_shipping_info("1 Main St"), Outcome::Applied);
        assert_eq!(shared.review_package(), Outcome::Applied);
        assert_eq!(
            shared.mark_delivered(),
            Outcome::Rejected(Rejection::NotConfirmed)
        );
        assert_eq!(
            shared.with_package(|p| p.shipping_info().map(str::to_string)),
            Some("1 Main St".to_string())
        );
    }
}
