//! Pay-period history fetcher
//!
//! Secondary resource: the list of pay periods with their aggregates. Shares
//! the read-through flow of the other fetchers; whether a failure here is
//! surfaced or merely logged is the coordinator's policy, not this module's.

use crate::cache::DataCache;

use super::service::BudgetService;
use super::{FetchState, PayPeriod};

/// Cache key for the pay-period list.
pub const PAY_PERIODS_CACHE_KEY: &str = "pay_periods";

/// Fetches pay periods, owning its loading/data/error state.
#[derive(Debug)]
pub struct PayPeriodsFetcher {
    service: BudgetService,
    cache: DataCache,
    pub state: FetchState<Vec<PayPeriod>>,
}

impl PayPeriodsFetcher {
    pub fn new(service: BudgetService, cache: DataCache) -> Self {
        Self {
            service,
            cache,
            state: FetchState::new(),
        }
    }

    /// Resolves the pay-period list, reading through the cache.
    pub async fn fetch(&mut self) {
        if let Some(cached) = self.cache.get::<Vec<PayPeriod>>(PAY_PERIODS_CACHE_KEY) {
            self.state.resolve(cached);
            return;
        }

        self.state.begin();
        match self.service.get_pay_periods().await {
            Ok(data) => {
                self.cache.set(PAY_PERIODS_CACHE_KEY, &data);
                self.state.resolve(data);
            }
            Err(e) => self.state.reject(e.into()),
        }
    }

    pub fn data(&self) -> Option<&[PayPeriod]> {
        self.state.data.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::service::ServiceDelays;
    use std::time::Duration;

    fn fetcher() -> PayPeriodsFetcher {
        let service = BudgetService::with_delays(ServiceDelays::none());
        let cache = DataCache::new(Duration::from_secs(60));
        PayPeriodsFetcher::new(service, cache)
    }

    #[tokio::test]
    async fn test_fetch_resolves_periods() {
        let mut fetcher = fetcher();
        fetcher.fetch().await;

        let periods = fetcher.data().expect("pay periods should be present");
        assert_eq!(periods.len(), 2);
        assert!(periods[1].is_current);
    }

    #[tokio::test]
    async fn test_repeat_fetch_is_served_from_cache() {
        let mut fetcher = fetcher();
        fetcher.fetch().await;
        fetcher.fetch().await;
        fetcher.fetch().await;

        assert_eq!(fetcher.service.stats().pay_period_calls, 1);
    }

    #[tokio::test]
    async fn test_fetch_after_clear_hits_backend_again() {
        let mut fetcher = fetcher();
        fetcher.fetch().await;
        fetcher.cache.clear();
        fetcher.fetch().await;

        assert_eq!(
            fetcher.service.stats().pay_period_calls,
            2,
            "a cleared cache must force a fresh backend call"
        );
    }

    #[tokio::test]
    async fn test_failure_is_recorded_in_state() {
        let mut fetcher = fetcher();
        fetcher.service.fail_pay_periods(true);
        fetcher.fetch().await;

        assert!(fetcher.state.error.is_some());
        assert!(fetcher.data().is_none());
    }
}
