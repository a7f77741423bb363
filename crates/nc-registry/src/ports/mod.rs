//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the registry subsystem.
//! These are the interfaces between the domain and the outside world.
//!
//! - **Driving Port (Inbound)**: `RegistryApi`
//! - **Driven Port (Outbound)**: `RegistryStore`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
