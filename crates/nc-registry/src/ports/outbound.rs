//! # Driven Port (SPI - Outbound)
//!
//! The keyed-storage interface the registry depends on. In production this is
//! backed by the host environment's transactional store; the in-memory
//! adapter is the reference implementation and the test substrate.
//!
//! The store itself is deliberately dumb: single-key reads and writes with no
//! cross-key rules. Every invariant that spans keys (uniqueness checks before
//! insert, ownership checks before reassignment, ledger bounds) is enforced
//! by the service inside its per-operation critical section.

use crate::domain::entities::{DomainRecord, IpRecord};
use crate::domain::value_objects::{DomainName, IpAddress};
use crate::errors::StoreError;
use async_trait::async_trait;
use shared_types::{Payment, Principal};

/// Interface for the registry's keyed stores and fee ledger.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    // =========================================================================
    // IP RECORDS
    // =========================================================================

    /// Get the record for an IP address, if present.
    async fn get_ip(&self, ip: &IpAddress) -> Result<Option<IpRecord>, StoreError>;

    /// Insert an IP record. The service guarantees the key is fresh.
    async fn insert_ip(&self, ip: IpAddress, record: IpRecord) -> Result<(), StoreError>;

    /// Check whether an IP address is keyed.
    async fn ip_exists(&self, ip: &IpAddress) -> Result<bool, StoreError> {
        Ok(self.get_ip(ip).await?.is_some())
    }

    // =========================================================================
    // DOMAIN RECORDS
    // =========================================================================

    /// Get the record for a domain name, if present.
    async fn get_domain(&self, domain: &DomainName) -> Result<Option<DomainRecord>, StoreError>;

    /// Insert a domain record. The service guarantees the key is fresh.
    async fn insert_domain(
        &self,
        domain: DomainName,
        record: DomainRecord,
    ) -> Result<(), StoreError>;

    /// Reassign the owner of an existing domain record.
    ///
    /// # Errors
    ///
    /// * `KeyNotFound` - no record exists under this name
    async fn set_domain_owner(
        &self,
        domain: &DomainName,
        new_owner: Principal,
    ) -> Result<(), StoreError>;

    // =========================================================================
    // FEE LEDGER
    // =========================================================================

    /// Current fee ledger balance.
    async fn fee_balance(&self) -> Result<u64, StoreError>;

    /// Absorb a collected fee into the ledger.
    async fn credit_fees(&self, fee: Payment) -> Result<(), StoreError>;

    /// Debit `amount` from the ledger.
    ///
    /// Returns `None` (ledger unchanged) when the amount exceeds the balance;
    /// the balance can never go negative.
    async fn debit_fees(&self, amount: u64) -> Result<Option<Payment>, StoreError>;

    // =========================================================================
    // MAINTENANCE
    // =========================================================================

    /// Remove an IP record. Maintenance/test tooling only - this is not part
    /// of the public operation surface, and no production caller reaches it.
    async fn purge_ip(&self, ip: &IpAddress) -> Result<(), StoreError>;

    /// Remove a domain record. Maintenance/test tooling only.
    async fn purge_domain(&self, domain: &DomainName) -> Result<(), StoreError>;
}

// =============================================================================
// TESTS
// =============================================================================
