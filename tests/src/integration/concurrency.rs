//! # Concurrency Tests
//!
//! Every mutating operation runs in a critical section, so concurrent calls
//! against the same keys serialize: one commits, the others observe the
//! committed state. These tests race real tasks through the service and
//! assert that ownership and the ledger come out exact.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_bus::InMemoryEventBus;
    use shared_types::{Payment, Principal};

    use nc_registry::adapters::InMemoryRegistry;
    use nc_registry::domain::value_objects::{DomainName, IpAddress, WebsiteCode};
    use nc_registry::errors::RegistryError;
    use nc_registry::ports::inbound::RegistryApi;
    use nc_registry::ports::outbound::RegistryStore;
    use nc_registry::service::{RegistryService, ServiceConfig, DEFAULT_DOMAIN_PRICE};

    const T0: u64 = 1_700_000_000_000;

    fn principal(byte: u8) -> Principal {
        Principal::new([byte; 32])
    }

    fn create_service() -> Arc<RegistryService<InMemoryRegistry, InMemoryEventBus>> {
        Arc::new(RegistryService::new(
            InMemoryRegistry::new(),
            Arc::new(InMemoryEventBus::new()),
            ServiceConfig::new(principal(0xEE)),
        ))
    }

    async fn assign(service: &Arc<RegistryService<InMemoryRegistry, InMemoryEventBus>>) {
        service
            .assign_domain(
                DomainName::from("contested.com"),
                IpAddress::from("10.0.0.1"),
                WebsiteCode::from("<html>race</html>"),
                principal(1),
                T0,
            )
            .await
            .expect("assignment");
    }

    /// Two concurrent purchases by the same buyer: the first commits, the
    /// second re-reads ownership inside its critical section and fails the
    /// self-purchase guard. Exactly one price lands in the ledger.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_double_purchase_same_buyer_charges_once() {
        crate::init_test_logging();
        let service = create_service();
        assign(&service).await;
        let buyer = principal(2);

        let mut handles = Vec::new();
        for _ in 0..2 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .buy_domain(
                        DomainName::from("contested.com"),
                        Payment::new(DEFAULT_DOMAIN_PRICE),
                        buyer,
                    )
                    .await
            }));
        }

        let mut successes = 0;
        let mut already_owner = 0;
        for handle in handles {
            match handle.await.expect("task") {
                Ok(refund) => {
                    refund.destroy_zero().expect("exact payment");
                    successes += 1;
                }
                Err(rejected) => {
                    assert!(matches!(rejected.reason, RegistryError::AlreadyOwner { .. }));
                    // The losing payment comes back in full
                    assert_eq!(rejected.payment.into_value(), DEFAULT_DOMAIN_PRICE);
                    already_owner += 1;
                }
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(already_owner, 1);

        // Never a double charge
        assert_eq!(
            service.store().fee_balance().await.unwrap(),
            DEFAULT_DOMAIN_PRICE
        );
        let record = service
            .store()
            .get_domain(&DomainName::from("contested.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.owner, buyer);
    }

    /// Two distinct buyers racing: both purchases may legitimately commit in
    /// sequence (the second buys from the first). Whatever the interleaving,
    /// the ledger holds exactly one price per committed purchase and the
    /// final owner is one of the racers.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_buyers_conserve_the_ledger() {
        let service = create_service();
        assign(&service).await;

        let buyers = [principal(2), principal(3)];
        let mut handles = Vec::new();
        for buyer in buyers {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .buy_domain(
                        DomainName::from("contested.com"),
                        Payment::new(DEFAULT_DOMAIN_PRICE),
                        buyer,
                    )
                    .await
            }));
        }

        let mut committed = 0u64;
        for handle in handles {
            if let Ok(refund) = handle.await.expect("task") {
                refund.destroy_zero().expect("exact payment");
                committed += 1;
            }
        }

        // Both succeed here: different buyers, serialized sections
        assert_eq!(committed, 2);
        assert_eq!(
            service.store().fee_balance().await.unwrap(),
            committed * DEFAULT_DOMAIN_PRICE
        );

        let record = service
            .store()
            .get_domain(&DomainName::from("contested.com"))
            .await
            .unwrap()
            .unwrap();
        assert!(buyers.contains(&record.owner));
    }

    /// Two concurrent assignments of one name: exactly one wins, the loser
    /// sees the key collision and writes nothing.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_assignments_one_winner() {
        let service = create_service();

        let mut handles = Vec::new();
        for byte in [1u8, 2u8] {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .assign_domain(
                        DomainName::from("contested.com"),
                        IpAddress::from(format!("10.0.0.{byte}").as_str()),
                        WebsiteCode::from("<html>race</html>"),
                        principal(byte),
                        T0,
                    )
                    .await
            }));
        }

        let mut wins = 0;
        let mut collisions = 0;
        for handle in handles {
            match handle.await.expect("task") {
                Ok(()) => wins += 1,
                Err(RegistryError::DomainAlreadyExists { .. }) => collisions += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(collisions, 1);

        // Exactly one domain record and one implicit IP allotment committed
        assert_eq!(service.store().domain_count(), 1);
        assert_eq!(service.store().ip_count(), 1);
    }

    /// Concurrent withdrawals never overdraw: with one price in the ledger,
    /// two full-balance withdrawals cannot both succeed.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_withdrawals_never_overdraw() {
        let service = create_service();
        assign(&service).await;
        let refund = service
            .buy_domain(
                DomainName::from("contested.com"),
                Payment::new(DEFAULT_DOMAIN_PRICE),
                principal(2),
            )
            .await
            .expect("purchase");
        refund.destroy_zero().expect("exact payment");

        let admin = principal(0xEE);
        let mut handles = Vec::new();
        for _ in 0..2 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .withdraw_fees(DEFAULT_DOMAIN_PRICE, admin, admin)
                    .await
            }));
        }

        let mut withdrawn = 0u64;
        let mut refused = 0;
        for handle in handles {
            match handle.await.expect("task") {
                Ok(funds) => withdrawn += funds.into_value(),
                Err(RegistryError::InsufficientFunds { .. }) => refused += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(withdrawn, DEFAULT_DOMAIN_PRICE);
        assert_eq!(refused, 1);
        assert_eq!(service.store().fee_balance().await.unwrap(), 0);
    }
}
