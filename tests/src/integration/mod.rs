//! # Integration Tests
//!
//! Flows that exercise the registry service, the in-memory stores, and the
//! event bus together, the way a host deployment wires them.

pub mod concurrency;
pub mod registry_flows;
