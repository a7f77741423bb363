//! # Principal Identity
//!
//! The opaque caller/owner identity supplied by the host execution
//! environment. The registry never authenticates a principal itself; it only
//! compares principals it was handed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte principal identifying a caller or record owner.
///
/// Principals are produced by the host environment's authentication layer and
/// treated as opaque byte strings here. Equality is the only operation the
/// registry relies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Principal(pub [u8; 32]);

impl Principal {
    /// The anonymous principal (all zeroes).
    pub const ANONYMOUS: Self = Self([0u8; 32]);

    /// Creates a principal from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a principal from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 32 {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the anonymous principal.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[28..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for Principal {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Principal> for [u8; 32] {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
