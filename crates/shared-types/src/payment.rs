//! # Payment Primitive
//!
//! The Rust seam for the host environment's currency type. A `Payment` is a
//! quantity of currency moving through a registry operation: it can be split,
//! merged, inspected for zero, and explicitly destroyed when empty.
//!
//! ## Value Conservation
//!
//! `Payment` is deliberately neither `Clone` nor `Copy`, and is `#[must_use]`:
//! currency cannot be duplicated, and the compiler flags any path that leaves
//! a payment unaccounted for. A zero-value remainder is destroyed with
//! [`Payment::destroy_zero`] rather than silently dropped, so every unit that
//! enters an operation is either deposited, returned, or provably empty.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from payment manipulation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Attempted to split more than the payment holds.
    #[error("split exceeds payment: requested {requested}, available {available}")]
    SplitExceedsValue { requested: u64, available: u64 },

    /// Attempted to destroy a payment that still holds value.
    #[error("cannot destroy non-zero payment of {0}")]
    NonZeroDestroy(u64),
}

/// A quantity of currency owned by the current operation.
#[must_use = "payments must be deposited, returned, or destroyed"]
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    value: u64,
}

impl Payment {
    /// Creates a payment of the given value.
    ///
    /// In production the host environment mints payments; this constructor is
    /// the boundary where host currency enters the registry core.
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Creates an empty payment.
    pub fn zero() -> Self {
        Self { value: 0 }
    }

    /// Returns the value held by this payment.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Returns true if this payment holds no value.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Splits `amount` out of this payment, leaving the remainder in place.
    ///
    /// # Errors
    ///
    /// Returns `SplitExceedsValue` if `amount` exceeds the held value. The
    /// payment is unchanged on failure.
    pub fn split(&mut self, amount: u64) -> Result<Payment, PaymentError> {
        if amount > self.value {
            return Err(PaymentError::SplitExceedsValue {
                requested: amount,
                available: self.value,
            });
        }
        self.value -= amount;
        Ok(Payment { value: amount })
    }

    /// Merges another payment into this one, consuming it.
    pub fn merge(&mut self, other: Payment) {
        self.value = self.value.saturating_add(other.value);
    }

    /// Destroys an empty payment.
    ///
    /// # Errors
    ///
    /// Returns `NonZeroDestroy` (handing the payment back) if it still holds
    /// value.
    pub fn destroy_zero(self) -> Result<(), (PaymentError, Payment)> {
        if self.value == 0 {
            Ok(())
        } else {
            let value = self.value;
            Err((PaymentError::NonZeroDestroy(value), self))
        }
    }

    /// Consumes the payment, surrendering its value to the caller.
    ///
    /// This is the accounting sink: ledgers call it when absorbing a payment
    /// into a balance.
    #[must_use]
    pub fn into_value(self) -> u64 {
        self.value
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

// =============================================================================
// TESTS
// =============================================================================
