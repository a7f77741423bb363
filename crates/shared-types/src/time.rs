//! # Timestamp Conventions
//!
//! The registry measures time in milliseconds since the Unix epoch, as
//! reported by the host environment's monotonic clock. Operations that depend
//! on time take an explicit `now` argument; the core never reads a wall clock
//! of its own.

/// Milliseconds since the Unix epoch.
pub type TimestampMs = u64;

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1_000;
