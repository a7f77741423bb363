//! # Registry Events
//!
//! Defines the notification types that flow through the shared bus. Each
//! corresponds to a committed state change in the Registry Service; observers
//! must tolerate at-least-once delivery.

use serde::{Deserialize, Serialize};
use shared_types::{Principal, TimestampMs};

/// All notifications that can be published to the event bus.
///
/// Payloads carry the key strings rather than the full records: indexers that
/// need record detail read it back through the registry's query operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RegistryEvent {
    // =========================================================================
    // IP REGISTRY
    // =========================================================================
    /// An IP address was allotted to an owner with hosted content.
    IpAllotted {
        /// The allotted IP address.
        ip: String,
        /// Principal that owns the new record.
        owner: Principal,
    },

    // =========================================================================
    // DOMAIN REGISTRY
    // =========================================================================
    /// A domain name was bound to an IP address.
    DomainAssigned {
        /// The assigned domain name.
        domain: String,
        /// IP address the domain now points at.
        ip: String,
        /// Principal that owns the new record.
        owner: Principal,
        /// Absolute expiry timestamp of the assignment.
        expiry_time: TimestampMs,
    },

    /// A domain changed hands through a paid purchase.
    DomainPurchased {
        /// The purchased domain name.
        domain: String,
        /// Principal that now owns the record.
        new_owner: Principal,
        /// Fixed price collected into the fee ledger.
        price: u64,
    },
}

impl RegistryEvent {
    /// Returns the topic this event belongs to.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::IpAllotted { .. } => EventTopic::IpRegistry,
            Self::DomainAssigned { .. } | Self::DomainPurchased { .. } => {
                EventTopic::DomainRegistry
            }
        }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::IpAllotted { .. } => "ip_allotted",
            Self::DomainAssigned { .. } => "domain_assigned",
            Self::DomainPurchased { .. } => "domain_purchased",
        }
    }
}

// =============================================================================
// TOPICS & FILTERS
// =============================================================================

/// Coarse event grouping for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTopic {
    /// IP allotment notifications.
    IpRegistry,
    /// Domain assignment and ownership-change notifications.
    DomainRegistry,
}

/// Filter describing which events a subscriber wants to receive.
#[derive(Debug, Clone)]
pub struct EventFilter {
    /// Topics to receive. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// A filter matching every event.
    #[must_use]
    pub fn all() -> Self {
        Self { topics: Vec::new() }
    }

    /// A filter matching only the given topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Returns true if the event passes this filter.
    #[must_use]
    pub fn matches(&self, event: &RegistryEvent) -> bool {
        self.topics.is_empty() || self.topics.contains(&event.topic())
    }
}

// =============================================================================
// TESTS
// =============================================================================
