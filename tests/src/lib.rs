//! # NameChain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate flows through service, stores, and bus
//!     ├── registry_flows.rs
//!     └── concurrency.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p nc-tests
//!
//! # By category
//! cargo test -p nc-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;

/// Initialize tracing output for a test run. Safe to call from every test;
/// only the first call installs the subscriber.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
