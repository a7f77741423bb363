//! # Driving Port (API - Inbound)
//!
//! The public operation surface of the registry. The host execution
//! environment (which authenticates callers and supplies the clock and
//! currency) drives the registry exclusively through this trait.

use crate::domain::entities::{DomainView, IpRecord};
use crate::domain::value_objects::{DomainName, IpAddress, WebsiteCode};
use crate::errors::{RegistryError, RejectedPayment};
use async_trait::async_trait;
use shared_types::{Payment, Principal, TimestampMs};

/// The registry's public operations.
///
/// Every method is atomic: all failure checks happen before any state write,
/// so a returned error guarantees the registry is unchanged.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Allot an IP address with its hosted content to an owner.
    ///
    /// No payment is required and any caller may allot.
    ///
    /// # Errors
    ///
    /// * `IpAlreadyExists` - the address is already keyed
    async fn allot_ip(
        &self,
        ip: IpAddress,
        website_code: WebsiteCode,
        owner: Principal,
    ) -> Result<(), RegistryError>;

    /// Look up the record for an IP address.
    ///
    /// # Errors
    ///
    /// * `IpNotFound` - no record exists for the address
    async fn lookup_ip(&self, ip: &IpAddress) -> Result<IpRecord, RegistryError>;

    /// Bind a domain name to an IP address, expiring one registration term
    /// after `now`.
    ///
    /// If the IP is unknown it is allotted first with the supplied
    /// `website_code` and `owner`; if it already exists, those arguments are
    /// silently ignored for the IP record.
    ///
    /// # Errors
    ///
    /// * `DomainAlreadyExists` - the name is already assigned (there is no
    ///   overwrite and no re-registration after expiry)
    async fn assign_domain(
        &self,
        domain: DomainName,
        ip: IpAddress,
        website_code: WebsiteCode,
        owner: Principal,
        now: TimestampMs,
    ) -> Result<(), RegistryError>;

    /// Resolve a domain to its owner, content, and expiry as of `now`.
    ///
    /// # Errors
    ///
    /// * `DomainNotFound` - the name is absent, OR logically expired
    ///   (`expiry_time <= now`; the record remains stored), OR its bound IP
    ///   record no longer exists. The three causes are indistinguishable in
    ///   the error message by design.
    async fn read_domain(
        &self,
        domain: &DomainName,
        now: TimestampMs,
    ) -> Result<DomainView, RegistryError>;

    /// Buy a domain from its current owner for the fixed price.
    ///
    /// Exactly the fixed price is collected into the fee ledger; the
    /// remainder of the payment is returned as the refund (possibly zero - the
    /// caller destroys a zero refund explicitly). Expiry is NOT extended or
    /// checked: an expired name can still be bought.
    ///
    /// # Errors
    ///
    /// The payment is returned inside `RejectedPayment` for:
    ///
    /// * `DomainNotFound` - the name is absent
    /// * `AlreadyOwner` - the buyer already owns the name
    /// * `InsufficientFunds` - the payment is below the fixed price
    async fn buy_domain(
        &self,
        domain: DomainName,
        payment: Payment,
        buyer: Principal,
    ) -> Result<Payment, RejectedPayment>;

    /// Hand a domain to a new owner, without payment or expiry change.
    ///
    /// Like `buy_domain`, this ignores expiry: an expired name can still be
    /// transferred.
    ///
    /// # Errors
    ///
    /// * `DomainNotFound` - the name is absent
    /// * `NotDomainOwner` - the caller does not own the name
    async fn transfer_domain(
        &self,
        domain: &DomainName,
        new_owner: Principal,
        caller: Principal,
    ) -> Result<(), RegistryError>;

    /// Withdraw collected fees from the ledger.
    ///
    /// Returns the withdrawn funds; delivering them to `recipient` is the
    /// host environment's currency transfer, outside this core.
    ///
    /// # Errors
    ///
    /// * `NotAdmin` - the caller is not the configured admin principal
    /// * `InsufficientFunds` - the amount exceeds the ledger balance
    async fn withdraw_fees(
        &self,
        amount: u64,
        recipient: Principal,
        caller: Principal,
    ) -> Result<Payment, RegistryError>;
}
