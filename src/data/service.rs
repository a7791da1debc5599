//! Simulated backend service
//!
//! Stands in for a real budgeting API: holds the session's data in memory,
//! sleeps to simulate network latency, and actually applies mutations so a
//! refetch after cache invalidation observes them. Call counters and
//! per-resource fault switches exist so tests can assert how often the
//! backend is hit and how failures propagate.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::{BudgetSnapshot, Entry, EntryDraft, EntryKind, PayPeriod, SavingsState};

/// Seed fixture embedded at compile time, mirroring the wire shape.
const SEED_JSON: &str = include_str!("seed.json");

/// Errors returned by the simulated backend.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The resource endpoint was switched into a failing state
    #[error("{0} service unavailable")]
    Unavailable(String),

    /// A mutation referenced an entry id that does not exist
    #[error("no {kind} entry with id {id}")]
    NotFound { kind: &'static str, id: u64 },
}

/// Per-endpoint simulated latency.
#[derive(Debug, Clone)]
pub struct ServiceDelays {
    pub budget: Duration,
    pub pay_periods: Duration,
    pub savings: Duration,
    pub add: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for ServiceDelays {
    fn default() -> Self {
        Self {
            budget: Duration::from_millis(500),
            pay_periods: Duration::from_millis(300),
            savings: Duration::from_millis(400),
            add: Duration::from_millis(1000),
            update: Duration::from_millis(800),
            delete: Duration::from_millis(600),
        }
    }
}

impl ServiceDelays {
    /// Zero latency everywhere, for tests.
    pub fn none() -> Self {
        Self {
            budget: Duration::ZERO,
            pay_periods: Duration::ZERO,
            savings: Duration::ZERO,
            add: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }
}

/// How many times each endpoint has been invoked.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceStats {
    pub budget_calls: u64,
    pub pay_period_calls: u64,
    pub savings_calls: u64,
    pub mutation_calls: u64,
}

/// Partial update applied to an existing entry; `None` fields are unchanged.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedData {
    budget: BudgetSnapshot,
    pay_periods: Vec<PayPeriod>,
    savings: SavingsState,
}

#[derive(Debug)]
struct ServiceState {
    budget: BudgetSnapshot,
    pay_periods: Vec<PayPeriod>,
    savings: SavingsState,
    stats: ServiceStats,
    fail_budget: bool,
    fail_pay_periods: bool,
    fail_savings: bool,
    fail_mutations: bool,
}

/// Handle to the simulated backend.
/// Clone is cheap: all clones share the same backing state.
#[derive(Debug, Clone)]
pub struct BudgetService {
    state: Arc<Mutex<ServiceState>>,
    delays: ServiceDelays,
}

impl BudgetService {
    /// Creates a service seeded with the embedded fixture and realistic
    /// per-endpoint latency.
    pub fn new() -> Self {
        Self::with_delays(ServiceDelays::default())
    }

    /// Creates a seeded service with custom latency. Tests use
    /// `ServiceDelays::none()`.
    pub fn with_delays(delays: ServiceDelays) -> Self {
        let seed: SeedData =
            serde_json::from_str(SEED_JSON).expect("embedded seed fixture is valid JSON");
        Self {
            state: Arc::new(Mutex::new(ServiceState {
                budget: seed.budget,
                pay_periods: seed.pay_periods,
                savings: seed.savings,
                stats: ServiceStats::default(),
                fail_budget: false,
                fail_pay_periods: false,
                fail_savings: false,
                fail_mutations: false,
            })),
            delays,
        }
    }

    /// Fetches the full budget snapshot (income + expenses).
    pub async fn get_budget_data(&self) -> Result<BudgetSnapshot, ServiceError> {
        tokio::time::sleep(self.delays.budget).await;
        let mut state = self.lock();
        state.stats.budget_calls += 1;
        if state.fail_budget {
            return Err(ServiceError::Unavailable("budget".to_string()));
        }
        Ok(state.budget.clone())
    }

    /// Fetches all pay periods, oldest first.
    pub async fn get_pay_periods(&self) -> Result<Vec<PayPeriod>, ServiceError> {
        tokio::time::sleep(self.delays.pay_periods).await;
        let mut state = self.lock();
        state.stats.pay_period_calls += 1;
        if state.fail_pay_periods {
            return Err(ServiceError::Unavailable("pay periods".to_string()));
        }
        Ok(state.pay_periods.clone())
    }

    /// Fetches the savings goal and its entries.
    pub async fn get_savings_data(&self) -> Result<SavingsState, ServiceError> {
        tokio::time::sleep(self.delays.savings).await;
        let mut state = self.lock();
        state.stats.savings_calls += 1;
        if state.fail_savings {
            return Err(ServiceError::Unavailable("savings".to_string()));
        }
        Ok(state.savings.clone())
    }

    /// Adds a new entry, assigning the next free id within its kind.
    pub async fn add_entry(&self, draft: EntryDraft) -> Result<Entry, ServiceError> {
        tokio::time::sleep(self.delays.add).await;
        let mut state = self.lock();
        state.stats.mutation_calls += 1;
        if state.fail_mutations {
            return Err(ServiceError::Unavailable("budget".to_string()));
        }

        let list = match draft.kind {
            EntryKind::Income => &mut state.budget.income,
            EntryKind::Expense => &mut state.budget.expenses,
        };
        let id = list.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let entry = Entry {
            id,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
        };
        list.push(entry.clone());
        Ok(entry)
    }

    /// Applies a partial update to an existing entry.
    pub async fn update_entry(
        &self,
        kind: EntryKind,
        id: u64,
        update: EntryUpdate,
    ) -> Result<Entry, ServiceError> {
        tokio::time::sleep(self.delays.update).await;
        let mut state = self.lock();
        state.stats.mutation_calls += 1;
        if state.fail_mutations {
            return Err(ServiceError::Unavailable("budget".to_string()));
        }

        let list = match kind {
            EntryKind::Income => &mut state.budget.income,
            EntryKind::Expense => &mut state.budget.expenses,
        };
        let entry = list
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ServiceError::NotFound {
                kind: kind.label(),
                id,
            })?;

        if let Some(amount) = update.amount {
            entry.amount = amount;
        }
        if let Some(category) = update.category {
            entry.category = category;
        }
        if let Some(date) = update.date {
            entry.date = date;
        }
        Ok(entry.clone())
    }

    /// Removes an entry.
    pub async fn delete_entry(&self, kind: EntryKind, id: u64) -> Result<(), ServiceError> {
        tokio::time::sleep(self.delays.delete).await;
        let mut state = self.lock();
        state.stats.mutation_calls += 1;
        if state.fail_mutations {
            return Err(ServiceError::Unavailable("budget".to_string()));
        }

        let list = match kind {
            EntryKind::Income => &mut state.budget.income,
            EntryKind::Expense => &mut state.budget.expenses,
        };
        let before = list.len();
        list.retain(|e| e.id != id);
        if list.len() == before {
            return Err(ServiceError::NotFound {
                kind: kind.label(),
                id,
            });
        }
        Ok(())
    }

    /// Snapshot of the call counters.
    pub fn stats(&self) -> ServiceStats {
        self.lock().stats
    }

    /// Switches the budget endpoint into (or out of) a failing state.
    pub fn fail_budget(&self, fail: bool) {
        self.lock().fail_budget = fail;
    }

    /// Switches the pay-period endpoint into (or out of) a failing state.
    pub fn fail_pay_periods(&self, fail: bool) {
        self.lock().fail_pay_periods = fail;
    }

    /// Switches the savings endpoint into (or out of) a failing state.
    pub fn fail_savings(&self, fail: bool) {
        self.lock().fail_savings = fail;
    }

    /// Switches all mutation endpoints into (or out of) a failing state.
    pub fn fail_mutations(&self, fail: bool) {
        self.lock().fail_mutations = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ServiceState> {
        self.state.lock().expect("service lock poisoned")
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
