//! # Registry Service
//!
//! Production service that composes the keyed stores and the fee ledger under
//! the registry's invariants and emits notifications through the event bus.
//!
//! ## Transaction Boundary
//!
//! The host execution environment this core was designed for runs every
//! top-level operation atomically with exclusive access to its mutable state.
//! Outside that environment the service reproduces the guarantee itself: all
//! mutating operations serialize through one internal lock, and every failure
//! check precedes the first write, so each call is all-or-nothing. Two
//! concurrent purchases of one domain serialize; the second observes the
//! updated owner and proceeds or fails `AlreadyOwner` - never a double
//! charge. Read operations touch no mutable state and take no lock.
//!
//! ## Notifications
//!
//! Events are published after the state writes of an operation and are not
//! transactional: observers get at-least-once delivery and must tolerate
//! duplicates. A failed operation never publishes.

use crate::adapters::InMemoryRegistry;
use crate::domain::entities::{DomainRecord, DomainView, IpRecord};
use crate::domain::value_objects::{DomainName, IpAddress, WebsiteCode};
use crate::errors::{NotFoundReason, RegistryError, RejectedPayment};
use crate::ports::inbound::RegistryApi;
use crate::ports::outbound::RegistryStore;

use async_trait::async_trait;
use shared_bus::{EventPublisher, InMemoryEventBus, RegistryEvent};
use shared_types::{Payment, Principal, TimestampMs};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Fixed price of a domain purchase, in the host currency's base units.
pub const DEFAULT_DOMAIN_PRICE: u64 = 1_000_000_000;

/// Registry Service configuration.
///
/// The admin principal is deployment configuration injected at initialization;
/// it is deliberately NOT a compile-time constant.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Principal allowed to withdraw collected fees.
    pub admin: Principal,
    /// Fixed purchase price per domain.
    pub domain_price: u64,
}

impl ServiceConfig {
    /// Creates a configuration for the given admin with the default price.
    #[must_use]
    pub fn new(admin: Principal) -> Self {
        Self {
            admin,
            domain_price: DEFAULT_DOMAIN_PRICE,
        }
    }

    /// Overrides the purchase price.
    #[must_use]
    pub fn with_domain_price(mut self, price: u64) -> Self {
        self.domain_price = price;
        self
    }
}

/// Statistics for the Registry Service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// IP addresses allotted (directly or via domain assignment).
    pub ips_allotted: u64,
    /// Domains assigned.
    pub domains_assigned: u64,
    /// Successful purchases.
    pub domains_purchased: u64,
    /// Successful ownership transfers.
    pub domains_transferred: u64,
    /// Successful fee withdrawals.
    pub withdrawals: u64,
    /// Mutating operations rejected by a failure check.
    pub rejected_operations: u64,
    /// Total fees collected into the ledger.
    pub fees_collected: u64,
}

/// The main Registry Service.
///
/// This service:
/// 1. Is the only component that mutates the stores and the ledger
/// 2. Enforces the cross-store invariants on every operation
/// 3. Publishes committed state changes to the event bus
/// 4. Maintains operation statistics
pub struct RegistryService<S: RegistryStore, P: EventPublisher> {
    /// Service configuration.
    config: ServiceConfig,
    /// Keyed stores and fee ledger.
    store: Arc<S>,
    /// Notification bus.
    bus: Arc<P>,
    /// Serializes mutating operations (the transaction boundary).
    txn: Mutex<()>,
    /// Service statistics.
    stats: Arc<RwLock<ServiceStats>>,
}

impl<S: RegistryStore, P: EventPublisher> RegistryService<S, P> {
    /// Create a new Registry Service.
    pub fn new(store: S, bus: Arc<P>, config: ServiceConfig) -> Self {
        Self {
            config,
            store: Arc::new(store),
            bus,
            txn: Mutex::new(()),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Handle to the underlying store.
    ///
    /// For maintenance tooling and tests; ordinary callers go through
    /// `RegistryApi` only.
    #[must_use]
    pub fn store(&self) -> Arc<S> {
        self.store.clone()
    }

    async fn note_rejection(&self) {
        self.stats.write().await.rejected_operations += 1;
    }

    /// Allot an IP record, assuming the caller holds the transaction lock.
    ///
    /// Shared by the public `allot_ip` and the implicit allotment inside
    /// `assign_domain`; both compose its failure path into their own.
    async fn allot_ip_locked(
        &self,
        ip: IpAddress,
        website_code: WebsiteCode,
        owner: Principal,
    ) -> Result<(), RegistryError> {
        if self.store.ip_exists(&ip).await? {
            return Err(RegistryError::IpAlreadyExists {
                ip: ip.as_str().to_string(),
            });
        }

        self.store
            .insert_ip(ip.clone(), IpRecord::new(website_code, owner))
            .await?;
        self.stats.write().await.ips_allotted += 1;

        info!(ip = %ip, owner = %owner, "IP allotted");
        self.bus
            .publish(RegistryEvent::IpAllotted {
                ip: ip.as_str().to_string(),
                owner,
            })
            .await;

        Ok(())
    }

    fn domain_not_found(domain: &DomainName, reason: NotFoundReason) -> RegistryError {
        RegistryError::DomainNotFound {
            domain: domain.as_str().to_string(),
            reason,
        }
    }
}

// =============================================================================
// RegistryApi Implementation
// =============================================================================

#[async_trait]
impl<S: RegistryStore, P: EventPublisher> RegistryApi for RegistryService<S, P> {
    #[instrument(skip(self, website_code), fields(op_id = %Uuid::new_v4()))]
    async fn allot_ip(
        &self,
        ip: IpAddress,
        website_code: WebsiteCode,
        owner: Principal,
    ) -> Result<(), RegistryError> {
        let _txn = self.txn.lock().await;

        let result = self.allot_ip_locked(ip, website_code, owner).await;
        if let Err(e) = &result {
            warn!(error = %e, "IP allotment rejected");
            self.note_rejection().await;
        }
        result
    }

    async fn lookup_ip(&self, ip: &IpAddress) -> Result<IpRecord, RegistryError> {
        self.store
            .get_ip(ip)
            .await?
            .ok_or_else(|| RegistryError::IpNotFound {
                ip: ip.as_str().to_string(),
            })
    }

    #[instrument(skip(self, website_code), fields(op_id = %Uuid::new_v4()))]
    async fn assign_domain(
        &self,
        domain: DomainName,
        ip: IpAddress,
        website_code: WebsiteCode,
        owner: Principal,
        now: TimestampMs,
    ) -> Result<(), RegistryError> {
        let _txn = self.txn.lock().await;

        if self.store.get_domain(&domain).await?.is_some() {
            self.note_rejection().await;
            return Err(RegistryError::DomainAlreadyExists {
                domain: domain.as_str().to_string(),
            });
        }

        // Implicit allotment: an unknown IP is created from the supplied
        // content and owner. A known IP keeps its record; the arguments for
        // it are ignored.
        if !self.store.ip_exists(&ip).await? {
            self.allot_ip_locked(ip.clone(), website_code, owner).await?;
        }

        let record = DomainRecord::assign(ip.clone(), owner, now);
        let expiry_time = record.expiry_time;
        self.store.insert_domain(domain.clone(), record).await?;
        self.stats.write().await.domains_assigned += 1;

        info!(
            domain = %domain,
            ip = %ip,
            owner = %owner,
            expiry_time,
            "Domain assigned"
        );
        self.bus
            .publish(RegistryEvent::DomainAssigned {
                domain: domain.as_str().to_string(),
                ip: ip.as_str().to_string(),
                owner,
                expiry_time,
            })
            .await;

        Ok(())
    }

    async fn read_domain(
        &self,
        domain: &DomainName,
        now: TimestampMs,
    ) -> Result<DomainView, RegistryError> {
        let Some(record) = self.store.get_domain(domain).await? else {
            return Err(Self::domain_not_found(domain, NotFoundReason::Absent));
        };

        if record.is_expired(now) {
            debug!(domain = %domain, expiry_time = record.expiry_time, now, "Read of expired domain");
            return Err(Self::domain_not_found(domain, NotFoundReason::Expired));
        }

        let Some(ip_record) = self.store.get_ip(&record.ip_address).await? else {
            debug!(domain = %domain, ip = %record.ip_address, "Domain references missing IP");
            return Err(Self::domain_not_found(domain, NotFoundReason::DanglingIp));
        };

        Ok(DomainView {
            owner: record.owner,
            website_code: ip_record.website_code,
            expiry_time: record.expiry_time,
        })
    }

    #[instrument(skip(self, payment), fields(op_id = %Uuid::new_v4(), payment_value = payment.value()))]
    async fn buy_domain(
        &self,
        domain: DomainName,
        payment: Payment,
        buyer: Principal,
    ) -> Result<Payment, RejectedPayment> {
        let _txn = self.txn.lock().await;

        let record = match self.store.get_domain(&domain).await {
            Ok(record) => record,
            Err(e) => return Err(RejectedPayment::new(payment, e.into())),
        };

        // Expiry is deliberately NOT checked here: an expired name remains
        // purchasable, only reads observe expiry.
        let Some(record) = record else {
            self.note_rejection().await;
            return Err(RejectedPayment::new(
                payment,
                Self::domain_not_found(&domain, NotFoundReason::Absent),
            ));
        };

        if record.owner == buyer {
            self.note_rejection().await;
            return Err(RejectedPayment::new(
                payment,
                RegistryError::AlreadyOwner {
                    domain: domain.as_str().to_string(),
                },
            ));
        }

        let price = self.config.domain_price;
        if payment.value() < price {
            self.note_rejection().await;
            let available = payment.value();
            return Err(RejectedPayment::new(
                payment,
                RegistryError::InsufficientFunds {
                    required: price,
                    available,
                },
            ));
        }

        // All checks passed; split the fee out and commit.
        let mut payment = payment;
        let fee = match payment.split(price) {
            Ok(fee) => fee,
            Err(e) => {
                // Unreachable after the value check; keep the payment safe.
                return Err(RejectedPayment::new(
                    payment,
                    RegistryError::InsufficientFunds {
                        required: price,
                        available: match e {
                            shared_types::PaymentError::SplitExceedsValue {
                                available, ..
                            } => available,
                            shared_types::PaymentError::NonZeroDestroy(v) => v,
                        },
                    },
                ));
            }
        };

        if let Err(e) = self.store.credit_fees(fee).await {
            // The fee payment was consumed by the failed credit attempt;
            // store failures are fatal to the deployment, not recoverable.
            return Err(RejectedPayment::new(payment, e.into()));
        }
        if let Err(e) = self.store.set_domain_owner(&domain, buyer).await {
            return Err(RejectedPayment::new(payment, e.into()));
        }

        {
            let mut stats = self.stats.write().await;
            stats.domains_purchased += 1;
            stats.fees_collected += price;
        }

        info!(
            domain = %domain,
            previous_owner = %record.owner,
            new_owner = %buyer,
            price,
            refund = payment.value(),
            "Domain purchased"
        );
        self.bus
            .publish(RegistryEvent::DomainPurchased {
                domain: domain.as_str().to_string(),
                new_owner: buyer,
                price,
            })
            .await;

        // The remainder goes back to the buyer, zero or not; the caller
        // destroys a zero refund explicitly.
        Ok(payment)
    }

    #[instrument(skip(self), fields(op_id = %Uuid::new_v4()))]
    async fn transfer_domain(
        &self,
        domain: &DomainName,
        new_owner: Principal,
        caller: Principal,
    ) -> Result<(), RegistryError> {
        let _txn = self.txn.lock().await;

        // As with purchases, expiry is not checked on transfer.
        let Some(record) = self.store.get_domain(domain).await? else {
            self.note_rejection().await;
            return Err(Self::domain_not_found(domain, NotFoundReason::Absent));
        };

        if record.owner != caller {
            self.note_rejection().await;
            warn!(domain = %domain, caller = %caller, "Transfer by non-owner rejected");
            return Err(RegistryError::NotDomainOwner {
                domain: domain.as_str().to_string(),
            });
        }

        self.store.set_domain_owner(domain, new_owner).await?;
        self.stats.write().await.domains_transferred += 1;

        info!(domain = %domain, from = %caller, to = %new_owner, "Domain transferred");
        Ok(())
    }

    #[instrument(skip(self), fields(op_id = %Uuid::new_v4()))]
    async fn withdraw_fees(
        &self,
        amount: u64,
        recipient: Principal,
        caller: Principal,
    ) -> Result<Payment, RegistryError> {
        let _txn = self.txn.lock().await;

        if caller != self.config.admin {
            self.note_rejection().await;
            warn!(caller = %caller, "Fee withdrawal by non-admin rejected");
            return Err(RegistryError::NotAdmin);
        }

        let available = self.store.fee_balance().await?;
        let Some(funds) = self.store.debit_fees(amount).await? else {
            self.note_rejection().await;
            return Err(RegistryError::InsufficientFunds {
                required: amount,
                available,
            });
        };

        self.stats.write().await.withdrawals += 1;

        info!(amount, recipient = %recipient, "Fees withdrawn");
        Ok(funds)
    }
}

/// Create a default service with in-memory adapters (for testing).
#[must_use]
pub fn create_test_service() -> RegistryService<InMemoryRegistry, InMemoryEventBus> {
    RegistryService::new(
        InMemoryRegistry::new(),
        Arc::new(InMemoryEventBus::new()),
        ServiceConfig::new(TEST_ADMIN),
    )
}

/// Admin principal used by `create_test_service`.
pub const TEST_ADMIN: Principal = Principal::new([0xAD; 32]);

// =============================================================================
// TESTS
// =============================================================================
