//! # In-Memory Store Adapter
//!
//! Reference implementation of `RegistryStore` over `RwLock<HashMap>` maps.
//! Production deployments replace this with the host environment's
//! transactional store; tests and single-node operation use it directly.

use crate::domain::entities::{DomainRecord, FeeLedger, IpRecord};
use crate::domain::value_objects::{DomainName, IpAddress};
use crate::errors::StoreError;
use crate::ports::outbound::RegistryStore;
use async_trait::async_trait;
use shared_types::{Payment, Principal};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory keyed stores plus the fee ledger.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    /// IP address -> record.
    ips: RwLock<HashMap<IpAddress, IpRecord>>,
    /// Domain name -> record.
    domains: RwLock<HashMap<DomainName, DomainRecord>>,
    /// Collected purchase fees.
    ledger: RwLock<FeeLedger>,
}

impl InMemoryRegistry {
    /// Create a new empty registry store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of IP records held.
    pub fn ip_count(&self) -> usize {
        self.ips.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Number of domain records held.
    pub fn domain_count(&self) -> usize {
        self.domains.read().map(|m| m.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RegistryStore for InMemoryRegistry {
    async fn get_ip(&self, ip: &IpAddress) -> Result<Option<IpRecord>, StoreError> {
        let ips = self.ips.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(ips.get(ip).cloned())
    }

    async fn insert_ip(&self, ip: IpAddress, record: IpRecord) -> Result<(), StoreError> {
        let mut ips = self.ips.write().map_err(|_| StoreError::LockPoisoned)?;
        ips.insert(ip, record);
        Ok(())
    }

    async fn get_domain(&self, domain: &DomainName) -> Result<Option<DomainRecord>, StoreError> {
        let domains = self.domains.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(domains.get(domain).cloned())
    }

    async fn insert_domain(
        &self,
        domain: DomainName,
        record: DomainRecord,
    ) -> Result<(), StoreError> {
        let mut domains = self.domains.write().map_err(|_| StoreError::LockPoisoned)?;
        domains.insert(domain, record);
        Ok(())
    }

    async fn set_domain_owner(
        &self,
        domain: &DomainName,
        new_owner: Principal,
    ) -> Result<(), StoreError> {
        let mut domains = self.domains.write().map_err(|_| StoreError::LockPoisoned)?;
        let record = domains
            .get_mut(domain)
            .ok_or_else(|| StoreError::KeyNotFound(domain.as_str().to_string()))?;
        record.owner = new_owner;
        Ok(())
    }

    async fn fee_balance(&self) -> Result<u64, StoreError> {
        let ledger = self.ledger.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(ledger.balance())
    }

    async fn credit_fees(&self, fee: Payment) -> Result<(), StoreError> {
        let mut ledger = self.ledger.write().map_err(|_| StoreError::LockPoisoned)?;
        ledger.deposit(fee);
        Ok(())
    }

    async fn debit_fees(&self, amount: u64) -> Result<Option<Payment>, StoreError> {
        let mut ledger = self.ledger.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(ledger.withdraw(amount))
    }

    async fn purge_ip(&self, ip: &IpAddress) -> Result<(), StoreError> {
        let mut ips = self.ips.write().map_err(|_| StoreError::LockPoisoned)?;
        ips.remove(ip);
        Ok(())
    }

    async fn purge_domain(&self, domain: &DomainName) -> Result<(), StoreError> {
        let mut domains = self.domains.write().map_err(|_| StoreError::LockPoisoned)?;
        domains.remove(domain);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
