//! # Shared Bus - Event Emitter for Registry Notifications
//!
//! Carries state-change notifications from the Registry Service to external
//! observers (indexers, monitors). Delivery is at-least-once and the bus is
//! NOT part of transactional state: a notification may be observed for an
//! operation whose caller saw it commit, but never for one that failed.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────┐
//! │ Registry Service │                    │   Indexer    │
//! │                  │    publish()       │              │
//! │                  │ ──────┐            │              │
//! └──────────────────┘       │            └──────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │  Event Bus   │          │
//!                      │              │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, RegistryEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
