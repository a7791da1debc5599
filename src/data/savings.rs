//! Savings fetcher
//!
//! Secondary resource: the savings goal and its deposit/withdrawal entries.

use crate::cache::DataCache;

use super::service::BudgetService;
use super::{FetchState, SavingsState};

/// Cache key for savings data.
pub const SAVINGS_CACHE_KEY: &str = "savings_data";

/// Fetches savings data, owning its loading/data/error state.
#[derive(Debug)]
pub struct SavingsFetcher {
    service: BudgetService,
    cache: DataCache,
    pub state: FetchState<SavingsState>,
}

impl SavingsFetcher {
    pub fn new(service: BudgetService, cache: DataCache) -> Self {
        Self {
            service,
            cache,
            state: FetchState::new(),
        }
    }

    /// Resolves the savings state, reading through the cache.
    pub async fn fetch(&mut self) {
        if let Some(cached) = self.cache.get::<SavingsState>(SAVINGS_CACHE_KEY) {
            self.state.resolve(cached);
            return;
        }

        self.state.begin();
        match self.service.get_savings_data().await {
            Ok(data) => {
                self.cache.set(SAVINGS_CACHE_KEY, &data);
                self.state.resolve(data);
            }
            Err(e) => self.state.reject(e.into()),
        }
    }

    pub fn data(&self) -> Option<&SavingsState> {
        self.state.data.as_ref()
    }
}
