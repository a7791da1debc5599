//! Budget snapshot fetcher
//!
//! Primary resource of the data layer: income and expense entries fetched as
//! one unit. Reads through the shared cache and only hits the simulated
//! backend on a miss.

use crate::cache::DataCache;

use super::service::BudgetService;
use super::{BudgetSnapshot, FetchState};

/// Cache key for the budget snapshot.
pub const BUDGET_CACHE_KEY: &str = "budget_data";

/// Fetches the budget snapshot, owning its loading/data/error state.
#[derive(Debug)]
pub struct BudgetFetcher {
    service: BudgetService,
    cache: DataCache,
    pub state: FetchState<BudgetSnapshot>,
}

impl BudgetFetcher {
    pub fn new(service: BudgetService, cache: DataCache) -> Self {
        Self {
            service,
            cache,
            state: FetchState::new(),
        }
    }

    /// Resolves the budget snapshot.
    ///
    /// A cache hit resolves immediately and never toggles `loading`. On a
    /// miss the backend is awaited; success stores into the cache before the
    /// `loading` flag drops, failure surfaces as `state.error` with no data.
    pub async fn fetch(&mut self) {
        if let Some(cached) = self.cache.get::<BudgetSnapshot>(BUDGET_CACHE_KEY) {
            self.state.resolve(cached);
            return;
        }

        self.state.begin();
        match self.service.get_budget_data().await {
            Ok(data) => {
                self.cache.set(BUDGET_CACHE_KEY, &data);
                self.state.resolve(data);
            }
            Err(e) => self.state.reject(e.into()),
        }
    }

    pub fn data(&self) -> Option<&BudgetSnapshot> {
        self.state.data.as_ref()
    }
}
