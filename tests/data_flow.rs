//! Integration tests for the data layer
//!
//! Drives the coordinator and mutation actions together through the public
//! library surface, the way the application shell does.

use std::time::Duration;

use ledgerbook::cache::DataCache;
use ledgerbook::data::service::ServiceDelays;
use ledgerbook::data::{
    BudgetService, DataCoordinator, EntryActions, EntryDraft, EntryKind,
};

fn session() -> (DataCoordinator, EntryActions, BudgetService) {
    let service = BudgetService::with_delays(ServiceDelays::none());
    let cache = DataCache::new(Duration::from_secs(60));
    let coordinator = DataCoordinator::new(service.clone(), cache.clone());
    let actions = EntryActions::new(service.clone(), cache);
    (coordinator, actions, service)
}

fn salary_100() -> EntryDraft {
    EntryDraft {
        kind: EntryKind::Income,
        amount: 100.0,
        category: "Salary".to_string(),
        date: "2024-02-01".parse().expect("valid date"),
    }
}

#[tokio::test]
async fn test_add_entry_end_to_end() {
    let (mut coordinator, mut actions, service) = session();

    coordinator.load_all().await;
    let before = coordinator
        .budget_data()
        .expect("initial load should resolve budget data")
        .total_income();
    assert_eq!(service.stats().budget_calls, 1);

    // Mutation resolves successfully and invalidates the cache
    let entry = actions.add_entry(salary_100()).await.expect("add should succeed");
    assert_eq!(entry.category, "Salary");

    // The next read issues a fresh fetch and observes the new entry
    coordinator.load_all().await;
    assert_eq!(
        service.stats().budget_calls,
        2,
        "post-mutation read must hit the backend"
    );
    let after = coordinator.budget_data().expect("refetch resolves").total_income();
    assert!(
        (after - before - 100.0).abs() < 0.001,
        "income should increase by exactly the added amount"
    );
}

#[tokio::test]
async fn test_mutation_invalidates_unrelated_resources_too() {
    let (mut coordinator, mut actions, service) = session();
    coordinator.load_all().await;

    actions.add_entry(salary_100()).await.expect("add should succeed");
    coordinator.load_all().await;

    // Coarse invalidation: every resource refetches exactly once even though
    // only the budget snapshot changed.
    let stats = service.stats();
    assert_eq!(stats.pay_period_calls, 2);
    assert_eq!(stats.savings_calls, 2);
}

#[tokio::test]
async fn test_reads_within_ttl_never_refetch() {
    let (mut coordinator, _actions, service) = session();

    coordinator.load_all().await;
    coordinator.load_all().await;
    coordinator.load_all().await;

    let stats = service.stats();
    assert_eq!(stats.budget_calls, 1);
    assert_eq!(stats.pay_period_calls, 1);
    assert_eq!(stats.savings_calls, 1);
}

#[tokio::test]
async fn test_expired_cache_behaves_like_fresh_session() {
    let service = BudgetService::with_delays(ServiceDelays::none());
    let cache = DataCache::new(Duration::from_millis(20));
    let mut coordinator = DataCoordinator::new(service.clone(), cache);

    coordinator.load_all().await;
    tokio::time::sleep(Duration::from_millis(40)).await;
    coordinator.load_all().await;

    assert_eq!(
        service.stats().budget_calls,
        2,
        "an aged-out entry must read as a miss"
    );
}

#[tokio::test]
async fn test_failed_mutation_leaves_cached_reads_intact() {
    let (mut coordinator, mut actions, service) = session();
    coordinator.load_all().await;

    service.fail_mutations(true);
    let result = actions.add_entry(salary_100()).await;
    assert!(result.is_err());

    coordinator.load_all().await;
    assert_eq!(
        service.stats().budget_calls,
        1,
        "failed mutation must not invalidate the cache"
    );
}

#[tokio::test]
async fn test_secondary_failure_keeps_primary_usable() {
    let (mut coordinator, _actions, service) = session();
    service.fail_savings(true);

    coordinator.load_all().await;

    assert!(coordinator.error().is_none());
    assert!(coordinator.budget_data().is_some());
    assert!(coordinator.savings_data().is_none());
    assert!(coordinator.savings_state().error.is_some());

    // A refresh after the backend recovers fills the gap
    service.fail_savings(false);
    coordinator.refresh().await;
    assert!(coordinator.savings_data().is_some());
}
