//! Mutation actions
//!
//! Add/update/delete operations against the simulated backend. Every
//! successful mutation clears the entire cache so the next read of any
//! resource is authoritative; the invalidation is deliberately coarse. A
//! failed mutation changes nothing and the error propagates to the caller.

use chrono::NaiveDate;

use crate::cache::DataCache;

use super::service::{BudgetService, EntryUpdate, ServiceError};
use super::{Entry, EntryDraft, EntryKind};

/// Executes entry mutations and invalidates the shared cache on success.
#[derive(Debug)]
pub struct EntryActions {
    service: BudgetService,
    cache: DataCache,
    /// True while a mutation round trip is in flight.
    pub loading: bool,
}

impl EntryActions {
    pub fn new(service: BudgetService, cache: DataCache) -> Self {
        Self {
            service,
            cache,
            loading: false,
        }
    }

    /// Adds a new entry. On success the cache is cleared so every resource
    /// refetches on its next read.
    pub async fn add_entry(&mut self, draft: EntryDraft) -> Result<Entry, ServiceError> {
        self.loading = true;
        let result = self.service.add_entry(draft).await;
        if result.is_ok() {
            self.cache.clear();
        }
        self.loading = false;
        result
    }

    /// Applies a partial update to an existing entry.
    pub async fn update_entry(
        &mut self,
        kind: EntryKind,
        id: u64,
        update: EntryUpdate,
    ) -> Result<Entry, ServiceError> {
        self.loading = true;
        let result = self.service.update_entry(kind, id, update).await;
        if result.is_ok() {
            self.cache.clear();
        }
        self.loading = false;
        result
    }

    /// Deletes an entry.
    pub async fn delete_entry(&mut self, kind: EntryKind, id: u64) -> Result<(), ServiceError> {
        self.loading = true;
        let result = self.service.delete_entry(kind, id).await;
        if result.is_ok() {
            self.cache.clear();
        }
        self.loading = false;
        result
    }
}

/// Convenience constructor for a draft dated `date`.
pub fn draft(kind: EntryKind, amount: f64, category: &str, date: NaiveDate) -> EntryDraft {
    EntryDraft {
        kind,
        amount,
        category: category.to_string(),
        date,
    }
}
