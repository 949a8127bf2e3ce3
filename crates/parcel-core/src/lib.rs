//! # parcel-core: Package Lifecycle State Machine
//!
//! A package owns its contents and exactly one lifecycle state, and hands
//! every lifecycle operation to that state. The state decides whether the
//! operation is allowed and reports the answer as an [`Outcome`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Parcel Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Callers (shipping, payment, customer service)          │   │
//! │  │   decide WHEN a package changes state via set_state()           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ parcel-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  package  │  │   state   │  │   types   │  │  shared   │  │   │
//! │  │   │  Package  │─►│ Processing│  │  Outcome  │  │  Mutex    │  │   │
//! │  │   │ (context) │  │ InTransit │  │  Item     │  │  wrapper  │  │   │
//! │  │   └───────────┘  │ Delivered │  │ Operation │  └───────────┘  │   │
//! │  │                  │ Cancelled │  └───────────┘                  │   │
//! │  │                  └───────────┘                                  │   │
//! │  │                                                                 │   │
//! │  │   NO NETWORK • NO DATABASE • NO AUTO-ADVANCING STATE            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`package`] - The `Package` context and its lifecycle operations
//! - [`state`] - `PackageState` variants and their permission table
//! - [`types`] - `PackageId`, `Item`, `Operation`, `Outcome`
//! - [`error`] - `Rejection` reasons and error types
//! - [`validation`] - Input and config validation
//! - [`config`] - TOML/env configuration
//! - [`shared`] - `Arc<Mutex<Package>>` wrapper for multi-threaded hosts
//! - [`telemetry`] - `tracing` subscriber setup
//!
//! ## Design Principles
//!
//! 1. **Outcomes, not errors**: a refused operation is `Outcome::Rejected`,
//!    never a panic or `Err`
//! 2. **External transition authority**: only `set_state` changes state
//! 3. **Closed state set**: adding a state is a compile error until every
//!    operation handles it
//!
//! ## Example Usage
//!
//! ```rust
//! use parcel_core::{Outcome, Package, PackageState, Rejection};
//!
//! let mut package = Package::new("456");
//!
//! // New packages are Processing: not confirmed, so not deliverable
//! assert_eq!(
//!     package.mark_delivered(),
//!     Outcome::Rejected(Rejection::NotConfirmed)
//! );
//!
//! package.set_state(PackageState::InTransit);
//! assert!(package.mark_delivered().is_applied());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod package;
pub mod shared;
pub mod state;
pub mod telemetry;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::LifecycleConfig;
pub use error::{CoreError, CoreResult, Rejection, ValidationError};
pub use package::Package;
pub use shared::SharedPackage;
pub use state::PackageState;
pub use types::*;
