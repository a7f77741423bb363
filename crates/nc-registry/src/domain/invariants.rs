//! # Domain Invariants
//!
//! Critical invariants that MUST hold across registry operations. The service
//! enforces them by construction; these predicates make them independently
//! checkable from tests and debug assertions.

use crate::domain::entities::{DomainRecord, REGISTRATION_TERM_MS};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Expiry Formula: `expiry_time` is always exactly the assignment time plus
/// the fixed registration term. No rounding, no renewal.
#[must_use]
pub fn check_expiry_formula(record: &DomainRecord, assignment_time: u64) -> bool {
    record.expiry_time == assignment_time + REGISTRATION_TERM_MS
}

/// Ownership Handoff Preserves Binding: `buy_domain` and `transfer_domain`
/// change the owner and nothing else. Expiry and the bound IP are untouched.
#[must_use]
pub fn check_handoff_preserves_binding(before: &DomainRecord, after: &DomainRecord) -> bool {
    after.expiry_time == before.expiry_time && after.ip_address == before.ip_address
}

/// Payment Conservation: a successful purchase splits the payment into
/// exactly the fixed price (to the ledger) and the refund (to the buyer).
#[must_use]
pub fn check_purchase_conservation(payment: u64, price: u64, refund: u64) -> bool {
    payment == price + refund
}

/// Ledger Bounds: a withdrawal debits exactly the requested amount and the
/// balance never goes below zero.
#[must_use]
pub fn check_withdrawal_bounds(balance_before: u64, amount: u64, balance_after: u64) -> bool {
    amount <= balance_before && balance_after == balance_before - amount
}

// =============================================================================
// AGGREGATED CHECK
// =============================================================================

/// A violated invariant, with the observed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `expiry_time` diverged from assignment time + term.
    ExpiryFormula { expected: u64, actual: u64 },
    /// An ownership change altered expiry or the IP binding.
    BindingAltered,
    /// Purchase value was not conserved.
    PaymentNotConserved { payment: u64, price: u64, refund: u64 },
    /// The ledger balance moved by the wrong amount or went negative.
    LedgerBounds {
        balance_before: u64,
        amount: u64,
        balance_after: u64,
    },
}

/// Result of an aggregated invariant check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantCheckResult {
    /// All violations found (empty when every invariant holds).
    pub violations: Vec<InvariantViolation>,
}

impl InvariantCheckResult {
    /// Returns true if no invariant was violated.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks every invariant a successful purchase must uphold.
#[must_use]
pub fn check_purchase_invariants(
    before: &DomainRecord,
    after: &DomainRecord,
    payment: u64,
    price: u64,
    refund: u64,
    ledger_before: u64,
    ledger_after: u64,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_handoff_preserves_binding(before, after) {
        violations.push(InvariantViolation::BindingAltered);
    }

    if !check_purchase_conservation(payment, price, refund) {
        violations.push(InvariantViolation::PaymentNotConserved {
            payment,
            price,
            refund,
        });
    }

    // A purchase credits the ledger by exactly the price
    if ledger_after != ledger_before + price {
        violations.push(InvariantViolation::LedgerBounds {
            balance_before: ledger_before,
            amount: price,
            balance_after: ledger_after,
        });
    }

    InvariantCheckResult { violations }
}

// =============================================================================
// TESTS
// =============================================================================
