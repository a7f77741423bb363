//! # Registry Flow Tests
//!
//! End-to-end lifecycle of a domain: allotment, assignment, resolution,
//! purchase, transfer, withdrawal, and the notifications each step emits.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    // Shared infrastructure
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, RegistryEvent};
    use shared_types::{Payment, Principal};

    use crate::init_test_logging;

    // Registry subsystem
    use nc_registry::adapters::InMemoryRegistry;
    use nc_registry::domain::entities::REGISTRATION_TERM_MS;
    use nc_registry::domain::value_objects::{DomainName, IpAddress, WebsiteCode};
    use nc_registry::errors::{NotFoundReason, RegistryError};
    use nc_registry::ports::inbound::RegistryApi;
    use nc_registry::ports::outbound::RegistryStore;
    use nc_registry::service::{RegistryService, ServiceConfig, DEFAULT_DOMAIN_PRICE};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const T0: u64 = 1_700_000_000_000;

    fn admin() -> Principal {
        Principal::new([0xEE; 32])
    }

    fn random_principal() -> Principal {
        Principal::new(rand::random())
    }

    /// Wire a service the way a host deployment would.
    fn create_wired_service() -> (
        Arc<RegistryService<InMemoryRegistry, InMemoryEventBus>>,
        Arc<InMemoryEventBus>,
    ) {
        let bus = Arc::new(InMemoryEventBus::new());
        let service = Arc::new(RegistryService::new(
            InMemoryRegistry::new(),
            bus.clone(),
            ServiceConfig::new(admin()),
        ));
        (service, bus)
    }

    async fn next_event(sub: &mut shared_bus::Subscription) -> RegistryEvent {
        timeout(Duration::from_millis(200), sub.recv())
            .await
            .expect("timed out waiting for event")
            .expect("bus closed")
    }

    // =============================================================================
    // THE REFERENCE SCENARIO
    // =============================================================================

    /// The full marketplace walkthrough: assign "example.com", read it back
    /// exactly, sell it for the exact price, and observe expiry.
    #[tokio::test]
    async fn test_reference_scenario() {
        init_test_logging();
        let (service, _bus) = create_wired_service();
        let owner_a = random_principal();
        let buyer_b = random_principal();
        let domain = DomainName::from("example.com");

        // Assign at t0
        service
            .assign_domain(
                domain.clone(),
                IpAddress::from("192.168.1.1"),
                WebsiteCode::from("<html>test</html>"),
                owner_a,
                T0,
            )
            .await
            .expect("assignment");

        // Read at t0 returns (A, content, t0 + 31536000000) exactly
        let view = service.read_domain(&domain, T0).await.expect("read");
        assert_eq!(view.owner, owner_a);
        assert_eq!(view.website_code.as_str(), "<html>test</html>");
        assert_eq!(view.expiry_time, T0 + 31_536_000_000);

        // A cannot buy their own domain
        let rejected = service
            .buy_domain(domain.clone(), Payment::new(1_000_000_000), owner_a)
            .await
            .expect_err("self-purchase must fail");
        assert!(matches!(rejected.reason, RegistryError::AlreadyOwner { .. }));
        assert_eq!(rejected.payment.into_value(), 1_000_000_000);

        // B buys at the exact price: zero refund, ledger credited
        let refund = service
            .buy_domain(domain.clone(), Payment::new(1_000_000_000), buyer_b)
            .await
            .expect("purchase");
        assert!(refund.is_zero());
        refund.destroy_zero().expect("zero refund is destroyable");

        let view = service.read_domain(&domain, T0 + 1).await.expect("read");
        assert_eq!(view.owner, buyer_b);

        // Ledger holds exactly one price
        let funds = service
            .withdraw_fees(1_000_000_000, admin(), admin())
            .await
            .expect("withdrawal");
        assert_eq!(funds.into_value(), 1_000_000_000);

        // Reading after expiry fails as not-found
        let err = service
            .read_domain(&domain, T0 + 31_536_001_000)
            .await
            .expect_err("expired read must fail");
        assert!(err.is_not_found());
    }

    // =============================================================================
    // LIFECYCLE PIECES
    // =============================================================================

    #[tokio::test]
    async fn test_assignment_emits_allotment_and_assignment() {
        let (service, bus) = create_wired_service();
        let owner = random_principal();
        let mut sub = bus.subscribe(EventFilter::all());

        service
            .assign_domain(
                DomainName::from("example.com"),
                IpAddress::from("192.168.1.1"),
                WebsiteCode::from("<html>test</html>"),
                owner,
                T0,
            )
            .await
            .expect("assignment");

        // The unknown IP is allotted first, then the domain assigned
        match next_event(&mut sub).await {
            RegistryEvent::IpAllotted { ip, owner: event_owner } => {
                assert_eq!(ip, "192.168.1.1");
                assert_eq!(event_owner, owner);
            }
            other => panic!("expected IpAllotted, got {other:?}"),
        }
        match next_event(&mut sub).await {
            RegistryEvent::DomainAssigned {
                domain,
                ip,
                owner: event_owner,
                expiry_time,
            } => {
                assert_eq!(domain, "example.com");
                assert_eq!(ip, "192.168.1.1");
                assert_eq!(event_owner, owner);
                assert_eq!(expiry_time, T0 + REGISTRATION_TERM_MS);
            }
            other => panic!("expected DomainAssigned, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_purchase_event_carries_price_and_new_owner() {
        let (service, bus) = create_wired_service();
        let seller = random_principal();
        let buyer = random_principal();

        service
            .assign_domain(
                DomainName::from("market.io"),
                IpAddress::from("10.1.2.3"),
                WebsiteCode::from("<html>shop</html>"),
                seller,
                T0,
            )
            .await
            .expect("assignment");

        // Filter down to domain-registry notifications only
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::DomainRegistry]));

        let refund = service
            .buy_domain(
                DomainName::from("market.io"),
                Payment::new(DEFAULT_DOMAIN_PRICE + 7),
                buyer,
            )
            .await
            .expect("purchase");
        assert_eq!(refund.into_value(), 7);

        match next_event(&mut sub).await {
            RegistryEvent::DomainPurchased {
                domain,
                new_owner,
                price,
            } => {
                assert_eq!(domain, "market.io");
                assert_eq!(new_owner, buyer);
                assert_eq!(price, DEFAULT_DOMAIN_PRICE);
            }
            other => panic!("expected DomainPurchased, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transfer_then_buy_back() {
        let (service, _bus) = create_wired_service();
        let alice = random_principal();
        let bob = random_principal();
        let domain = DomainName::from("handoff.net");

        service
            .assign_domain(
                domain.clone(),
                IpAddress::from("10.0.0.7"),
                WebsiteCode::from("<html>page</html>"),
                alice,
                T0,
            )
            .await
            .expect("assignment");

        // Alice hands the name to Bob for free
        service
            .transfer_domain(&domain, bob, alice)
            .await
            .expect("transfer");
        assert_eq!(service.read_domain(&domain, T0).await.unwrap().owner, bob);

        // Alice buys it back at a price; expiry never moved
        let refund = service
            .buy_domain(domain.clone(), Payment::new(DEFAULT_DOMAIN_PRICE), alice)
            .await
            .expect("buy-back");
        refund.destroy_zero().expect("exact payment");

        let view = service.read_domain(&domain, T0).await.unwrap();
        assert_eq!(view.owner, alice);
        assert_eq!(view.expiry_time, T0 + REGISTRATION_TERM_MS);
    }

    #[tokio::test]
    async fn test_expired_name_stays_tradable_but_unreadable() {
        let (service, _bus) = create_wired_service();
        let owner = random_principal();
        let buyer = random_principal();
        let domain = DomainName::from("stale.org");
        let after_expiry = T0 + REGISTRATION_TERM_MS;

        service
            .assign_domain(
                domain.clone(),
                IpAddress::from("10.0.0.8"),
                WebsiteCode::from("<html>old</html>"),
                owner,
                T0,
            )
            .await
            .expect("assignment");

        // Unreadable from the expiry instant onward
        let err = service.read_domain(&domain, after_expiry).await.unwrap_err();
        match err {
            RegistryError::DomainNotFound { reason, .. } => {
                assert_eq!(reason, NotFoundReason::Expired);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Still purchasable and transferable; the record never left the store
        let refund = service
            .buy_domain(domain.clone(), Payment::new(DEFAULT_DOMAIN_PRICE), buyer)
            .await
            .expect("purchase of expired name");
        refund.destroy_zero().expect("exact payment");
        service
            .transfer_domain(&domain, owner, buyer)
            .await
            .expect("transfer of expired name");

        // Purchase did not revive readability
        assert!(service.read_domain(&domain, after_expiry).await.is_err());
    }

    #[tokio::test]
    async fn test_no_re_registration_after_expiry() {
        let (service, _bus) = create_wired_service();
        let owner = random_principal();
        let late_comer = random_principal();
        let domain = DomainName::from("once.only");

        service
            .assign_domain(
                domain.clone(),
                IpAddress::from("10.0.0.9"),
                WebsiteCode::from("<html>v1</html>"),
                owner,
                T0,
            )
            .await
            .expect("assignment");

        // Even long past expiry, the name cannot be assigned again
        let err = service
            .assign_domain(
                domain,
                IpAddress::from("10.0.0.10"),
                WebsiteCode::from("<html>v2</html>"),
                late_comer,
                T0 + 10 * REGISTRATION_TERM_MS,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::DomainAlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_withdrawals_accumulate_and_drain() {
        let (service, _bus) = create_wired_service();
        let seller = random_principal();
        let treasurer = random_principal();

        // Two sales, two prices in the ledger
        for (name, ip) in [("one.com", "10.0.1.1"), ("two.com", "10.0.1.2")] {
            service
                .assign_domain(
                    DomainName::from(name),
                    IpAddress::from(ip),
                    WebsiteCode::from("<html>x</html>"),
                    seller,
                    T0,
                )
                .await
                .expect("assignment");
            let refund = service
                .buy_domain(
                    DomainName::from(name),
                    Payment::new(DEFAULT_DOMAIN_PRICE),
                    random_principal(),
                )
                .await
                .expect("purchase");
            refund.destroy_zero().expect("exact payment");
        }

        // Non-admin cannot withdraw
        let err = service
            .withdraw_fees(1, treasurer, treasurer)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotAdmin));

        // Partial withdrawal, then the remainder
        let first = service
            .withdraw_fees(DEFAULT_DOMAIN_PRICE / 2, treasurer, admin())
            .await
            .expect("partial withdrawal");
        assert_eq!(first.into_value(), DEFAULT_DOMAIN_PRICE / 2);

        let rest = 2 * DEFAULT_DOMAIN_PRICE - DEFAULT_DOMAIN_PRICE / 2;
        let second = service
            .withdraw_fees(rest, treasurer, admin())
            .await
            .expect("final withdrawal");
        assert_eq!(second.into_value(), rest);

        // Ledger is empty; one more unit is too much
        let err = service.withdraw_fees(1, treasurer, admin()).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InsufficientFunds {
                required: 1,
                available: 0,
            }
        ));
    }

    #[tokio::test]
    async fn test_dangling_reference_reads_as_not_found() {
        let (service, _bus) = create_wired_service();
        let owner = random_principal();
        let domain = DomainName::from("dangling.dev");

        service
            .assign_domain(
                domain.clone(),
                IpAddress::from("10.0.2.1"),
                WebsiteCode::from("<html>y</html>"),
                owner,
                T0,
            )
            .await
            .expect("assignment");
        assert!(service.read_domain(&domain, T0).await.is_ok());

        // Maintenance tooling clears the IP record out from under the domain
        service
            .store()
            .purge_ip(&IpAddress::from("10.0.2.1"))
            .await
            .expect("purge");

        let err = service.read_domain(&domain, T0).await.unwrap_err();
        match err {
            RegistryError::DomainNotFound { reason, .. } => {
                assert_eq!(reason, NotFoundReason::DanglingIp);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
