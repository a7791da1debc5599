//! Data coordination layer
//!
//! Fans the three resource fetchers out concurrently and presents one
//! combined surface to the UI: data accessors, a consumer-visible loading and
//! error view that follows the primary (budget) resource, and a manual
//! refresh that invalidates the whole cache.
//!
//! Per-resource states remain accessible so a caller can surface secondary
//! failures itself; by default the coordinator only logs them.

use tracing::warn;

use crate::cache::DataCache;

use super::budget::BudgetFetcher;
use super::pay_periods::PayPeriodsFetcher;
use super::savings::SavingsFetcher;
use super::service::BudgetService;
use super::{BudgetSnapshot, FetchError, FetchState, PayPeriod, SavingsState};

/// Aggregates the three fetchers behind one loading/error/data surface.
#[derive(Debug)]
pub struct DataCoordinator {
    cache: DataCache,
    budget: BudgetFetcher,
    pay_periods: PayPeriodsFetcher,
    savings: SavingsFetcher,
}

impl DataCoordinator {
    /// Builds a coordinator over an explicitly provided service and cache,
    /// so tests can construct isolated sessions.
    pub fn new(service: BudgetService, cache: DataCache) -> Self {
        Self {
            budget: BudgetFetcher::new(service.clone(), cache.clone()),
            pay_periods: PayPeriodsFetcher::new(service.clone(), cache.clone()),
            savings: SavingsFetcher::new(service, cache.clone()),
            cache,
        }
    }

    /// Fetches all three resources concurrently.
    ///
    /// Completion order across resources is not defined; each fetcher's own
    /// loading transition stays sequential. Secondary-resource failures are
    /// logged here and left in their per-resource states rather than
    /// surfaced through [`error`](Self::error).
    pub async fn load_all(&mut self) {
        futures::join!(
            self.budget.fetch(),
            self.pay_periods.fetch(),
            self.savings.fetch(),
        );

        if let Some(e) = &self.pay_periods.state.error {
            warn!(error = %e, "pay period fetch failed");
        }
        if let Some(e) = &self.savings.state.error {
            warn!(error = %e, "savings fetch failed");
        }
    }

    /// Full resync: clears the entire cache, then re-fetches every resource
    /// regardless of which one actually changed.
    pub async fn refresh(&mut self) {
        self.cache.clear();
        self.load_all().await;
    }

    /// True while the primary (budget) fetch is in flight.
    pub fn loading(&self) -> bool {
        self.budget.state.loading
    }

    /// The consumer-visible error: primary resource only.
    pub fn error(&self) -> Option<&FetchError> {
        self.budget.state.error.as_ref()
    }

    pub fn budget_data(&self) -> Option<&BudgetSnapshot> {
        self.budget.data()
    }

    pub fn pay_periods(&self) -> Option<&[PayPeriod]> {
        self.pay_periods.data()
    }

    pub fn savings_data(&self) -> Option<&SavingsState> {
        self.savings.data()
    }

    /// Per-resource state for callers that want their own visibility policy.
    pub fn budget_state(&self) -> &FetchState<BudgetSnapshot> {
        &self.budget.state
    }

    pub fn pay_periods_state(&self) -> &FetchState<Vec<PayPeriod>> {
        &self.pay_periods.state
    }

    pub fn savings_state(&self) -> &FetchState<SavingsState> {
        &self.savings.state
    }
}
