//! # Value Objects
//!
//! Immutable key and payload types for the registry. These types represent
//! concepts defined by their value, not identity: two `DomainName`s with the
//! same string ARE the same name.
//!
//! Keys are opaque to the registry. No DNS syntax or IP-format validation is
//! performed here; the registry's contract is keyed uniqueness, and the host
//! environment owns whatever naming policy applies above it.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// DOMAIN NAME
// =============================================================================

/// A human-readable domain name, the unique key of a domain record.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainName(String);

impl DomainName {
    /// Creates a domain name from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainName({})", self.0)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DomainName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for DomainName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// =============================================================================
// IP ADDRESS
// =============================================================================

/// An IP address string, the unique key of an IP record.
///
/// Stored verbatim: "192.168.1.1" and "192.168.001.001" are distinct keys.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpAddress(String);

impl IpAddress {
    /// Creates an IP address key from a string.
    pub fn new(ip: impl Into<String>) -> Self {
        Self(ip.into())
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IpAddress({})", self.0)
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IpAddress {
    fn from(ip: &str) -> Self {
        Self(ip.to_string())
    }
}

impl From<String> for IpAddress {
    fn from(ip: String) -> Self {
        Self(ip)
    }
}

// =============================================================================
// WEBSITE CODE
// =============================================================================

/// The opaque content payload hosted at an IP address.
///
/// Fixed at allotment time; the registry never inspects or serves it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteCode(String);

impl WebsiteCode {
    /// Creates a content payload from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the payload as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for WebsiteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads can be large; show length only
        write!(f, "WebsiteCode({} bytes)", self.0.len())
    }
}

impl From<&str> for WebsiteCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for WebsiteCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

// =============================================================================
// TESTS
// =============================================================================
