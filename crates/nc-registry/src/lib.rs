//! # NC-Registry - Domain-Name Registry & Marketplace
//!
//! Maps IP addresses to hosted content, binds human-readable domain names to
//! those addresses with a fixed-term expiry, and re-owns names through paid
//! purchase or direct transfer. The service is the only component that
//! mutates the keyed stores and the fee ledger; the host execution
//! environment supplies caller identity, the clock, and the currency.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Unique IP and domain keys | `service.rs` - existence checks before every insert, under the transaction lock |
//! | Expiry = assignment time + 365 days, exactly | `domain/entities.rs` - `DomainRecord::assign` |
//! | Expiry observed by reads only | `service.rs` - `read_domain` checks it; `buy_domain`/`transfer_domain` never do |
//! | Ledger grows only by the fixed price per purchase | `service.rs` - `buy_domain` splits exactly `domain_price` |
//! | Ledger never negative | `domain/entities.rs` - `FeeLedger::withdraw` refuses over-balance debits |
//! | No partial state on failure | `service.rs` - every check precedes the first write of its operation |
//!
//! ## Operation Surface
//!
//! | Operation | Failure Modes |
//! |-----------|---------------|
//! | `allot_ip` | `IpAlreadyExists` |
//! | `lookup_ip` | `IpNotFound` |
//! | `assign_domain` | `DomainAlreadyExists` (+ implicit IP allotment) |
//! | `read_domain` | `DomainNotFound` (absent / expired / dangling, conflated) |
//! | `buy_domain` | `DomainNotFound`, `AlreadyOwner`, `InsufficientFunds` |
//! | `transfer_domain` | `DomainNotFound`, `NotDomainOwner` |
//! | `withdraw_fees` | `NotAdmin`, `InsufficientFunds` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use nc_registry::prelude::*;
//!
//! let service = create_test_service();
//! service
//!     .assign_domain(
//!         DomainName::from("example.com"),
//!         IpAddress::from("192.168.1.1"),
//!         WebsiteCode::from("<html>hello</html>"),
//!         owner,
//!         now,
//!     )
//!     .await?;
//!
//! let view = service.read_domain(&DomainName::from("example.com"), now).await?;
//! println!("owned by {}, expires at {}", view.owner, view.expiry_time);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        DomainRecord, DomainView, FeeLedger, IpRecord, REGISTRATION_TERM_MS,
    };

    // Value objects
    pub use crate::domain::value_objects::{DomainName, IpAddress, WebsiteCode};

    // Invariants
    pub use crate::domain::invariants::{
        check_expiry_formula, check_handoff_preserves_binding, check_purchase_conservation,
        check_purchase_invariants, check_withdrawal_bounds, InvariantCheckResult,
        InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::RegistryApi;
    pub use crate::ports::outbound::RegistryStore;

    // Errors
    pub use crate::errors::{NotFoundReason, RegistryError, RejectedPayment, StoreError};

    // Adapters
    pub use crate::adapters::InMemoryRegistry;

    // Service
    pub use crate::service::{
        create_test_service, RegistryService, ServiceConfig, ServiceStats,
        DEFAULT_DOMAIN_PRICE, TEST_ADMIN,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Domain Registry";

// =============================================================================
// TESTS
// =============================================================================
