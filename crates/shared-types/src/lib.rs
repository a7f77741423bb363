//! # Shared Types Crate
//!
//! This crate contains the primitives shared by every registry crate: the
//! `Principal` caller/owner identity, the `Payment` currency seam, and the
//! millisecond timestamp conventions.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Host Boundary Types**: `Principal` and `Payment` model values the host
//!   execution environment supplies (authenticated identity, currency). They
//!   carry no verification logic of their own.
//! - **Value Conservation**: `Payment` cannot be cloned or silently dropped;
//!   every unit of currency entering an operation must be deposited, returned,
//!   or explicitly destroyed as zero.

pub mod payment;
pub mod principal;
pub mod time;

pub use payment::{Payment, PaymentError};
pub use principal::Principal;
pub use time::{TimestampMs, MILLIS_PER_DAY};
