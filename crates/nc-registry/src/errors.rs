//! # Error Types
//!
//! All error types for registry operations.
//!
//! Every error is fatal to its operation, raised synchronously, and leaves no
//! partial state behind: each operation performs all of its checks before its
//! first write. Recovery is entirely the caller's responsibility.

use shared_types::Payment;
use std::fmt;
use thiserror::Error;

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Why a domain lookup failed.
///
/// Externally all three causes surface as the same `DomainNotFound` error with
/// the same message; the tag exists so operators and logs can disambiguate
/// without widening the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// No record exists under this name.
    Absent,
    /// The record exists but its expiry time has passed.
    Expired,
    /// The record exists but its bound IP record does not.
    DanglingIp,
}

/// Errors that can occur during registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The IP address is already allotted.
    #[error("ip already exists: {ip}")]
    IpAlreadyExists { ip: String },

    /// The domain name is already assigned.
    #[error("domain already exists: {domain}")]
    DomainAlreadyExists { domain: String },

    /// No record exists for this IP address.
    #[error("ip not found: {ip}")]
    IpNotFound { ip: String },

    /// The domain is absent, expired, or dangling (see `NotFoundReason`).
    #[error("domain not found: {domain}")]
    DomainNotFound {
        domain: String,
        reason: NotFoundReason,
    },

    /// The buyer already owns the domain.
    #[error("already owner of domain: {domain}")]
    AlreadyOwner { domain: String },

    /// The caller does not own the domain.
    #[error("not the owner of domain: {domain}")]
    NotDomainOwner { domain: String },

    /// The caller is not the configured admin principal.
    #[error("caller is not the registry admin")]
    NotAdmin,

    /// Payment below price, or withdrawal above balance.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    /// Store access error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl RegistryError {
    /// Returns true for key-collision errors.
    #[must_use]
    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            Self::IpAlreadyExists { .. } | Self::DomainAlreadyExists { .. }
        )
    }

    /// Returns true for not-found errors (including logical expiry and
    /// dangling references, which are deliberately indistinguishable here).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::IpNotFound { .. } | Self::DomainNotFound { .. }
        )
    }

    /// Returns true for authorization failures, including the self-purchase
    /// guard.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::NotDomainOwner { .. } | Self::NotAdmin | Self::AlreadyOwner { .. }
        )
    }
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from the keyed-store substrate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// An update targeted a key that is not present.
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

// =============================================================================
// REJECTED PAYMENTS
// =============================================================================

/// A purchase failure, handing the caller's payment back untouched.
///
/// `buy_domain` consumes its payment on success; on failure no value may be
/// lost, so the error carries the payment out again (the `std::sync::mpsc::SendError`
/// shape).
#[derive(Debug)]
pub struct RejectedPayment {
    /// The payment, returned in full.
    pub payment: Payment,
    /// Why the purchase was rejected.
    pub reason: RegistryError,
}

impl RejectedPayment {
    /// Pairs a rejection reason with the returned payment.
    #[must_use]
    pub fn new(payment: Payment, reason: RegistryError) -> Self {
        Self { payment, reason }
    }
}

impl fmt::Display for RejectedPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "purchase rejected: {}", self.reason)
    }
}

impl std::error::Error for RejectedPayment {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

// =============================================================================
// TESTS
// =============================================================================
