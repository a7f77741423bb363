//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the registry's driven ports.
//!
//! - Adapters implement domain ports
//! - The in-memory store is the reference implementation; a production
//!   deployment substitutes the host environment's transactional store

pub mod memory_store;

pub use memory_store::*;
