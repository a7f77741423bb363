//! # Core Domain Entities
//!
//! The records and the fee ledger that make up registry state.

use crate::domain::value_objects::{IpAddress, WebsiteCode};
use serde::{Deserialize, Serialize};
use shared_types::{Payment, Principal, TimestampMs, MILLIS_PER_DAY};

/// Fixed registration term: every assignment expires exactly 365 days after
/// its assignment time. No renewal operation exists.
pub const REGISTRATION_TERM_MS: u64 = 365 * MILLIS_PER_DAY;

// =============================================================================
// IP RECORD
// =============================================================================

/// A record mapping an IP address to hosted content and its owner.
///
/// Created by `allot_ip` or implicitly by `assign_domain`. Immutable once
/// created: no public operation rewrites content or owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRecord {
    /// Opaque content payload, fixed at allotment time.
    pub website_code: WebsiteCode,
    /// Principal that allotted the address.
    pub owner: Principal,
}

impl IpRecord {
    /// Creates a new IP record.
    #[must_use]
    pub fn new(website_code: WebsiteCode, owner: Principal) -> Self {
        Self {
            website_code,
            owner,
        }
    }
}

// =============================================================================
// DOMAIN RECORD
// =============================================================================

/// A record binding a domain name to an IP address with an owner and expiry.
///
/// The bound IP is a soft reference: it normally points at an existing
/// `IpRecord`, but the registry does not re-verify the reference on ownership
/// changes, only on reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// IP address the domain points at.
    pub ip_address: IpAddress,
    /// Current owner of the domain.
    pub owner: Principal,
    /// Absolute expiry timestamp (assignment time + `REGISTRATION_TERM_MS`).
    pub expiry_time: TimestampMs,
}

impl DomainRecord {
    /// Creates a record expiring exactly one registration term after `now`.
    #[must_use]
    pub fn assign(ip_address: IpAddress, owner: Principal, now: TimestampMs) -> Self {
        Self {
            ip_address,
            owner,
            expiry_time: now + REGISTRATION_TERM_MS,
        }
    }

    /// Returns true once the record is logically expired.
    ///
    /// Expiry is inclusive: a read at exactly `expiry_time` already fails.
    /// The record itself stays in the store; only reads observe expiry.
    #[must_use]
    pub fn is_expired(&self, now: TimestampMs) -> bool {
        self.expiry_time <= now
    }
}

/// The view returned by `read_domain`: the resolved owner, content, and
/// expiry of a live (present, unexpired, non-dangling) domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainView {
    /// Current owner of the domain.
    pub owner: Principal,
    /// Content payload of the bound IP record.
    pub website_code: WebsiteCode,
    /// Absolute expiry timestamp.
    pub expiry_time: TimestampMs,
}

// =============================================================================
// FEE LEDGER
// =============================================================================

/// Accumulator of currency collected from domain purchases.
///
/// The balance only grows by absorbing purchase fees and only shrinks through
/// explicit admin withdrawal bounded by the current balance; it can never go
/// negative.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLedger {
    balance: u64,
}

impl FeeLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current balance.
    #[must_use]
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Absorbs a payment into the balance, consuming it.
    pub fn deposit(&mut self, fee: Payment) {
        self.balance = self.balance.saturating_add(fee.into_value());
    }

    /// Withdraws `amount` from the balance.
    ///
    /// Returns `None` (balance unchanged) if `amount` exceeds the balance.
    #[must_use]
    pub fn withdraw(&mut self, amount: u64) -> Option<Payment> {
        if amount > self.balance {
            return None;
        }
        self.balance -= amount;
        Some(Payment::new(amount))
    }
}

// =============================================================================
// TESTS
// =============================================================================
