//! Core data layer for ledgerbook
//!
//! This module contains the domain models plus the fetch/mutation machinery:
//! one fetcher per resource (budget entries, pay periods, savings), a
//! coordinator that fans the fetchers out and aggregates their state, and the
//! mutation actions that invalidate the shared cache.

pub mod actions;
pub mod budget;
pub mod coordinator;
pub mod pay_periods;
pub mod savings;
pub mod service;

pub use actions::EntryActions;
pub use budget::BudgetFetcher;
pub use coordinator::DataCoordinator;
pub use pay_periods::PayPeriodsFetcher;
pub use savings::SavingsFetcher;
pub use service::{BudgetService, ServiceError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Whether a budget entry is money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        }
    }
}

/// A single income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier assigned by the backend
    pub id: u64,
    /// Amount in dollars, always non-negative
    pub amount: f64,
    /// Category label (e.g. "Salary", "Housing")
    pub category: String,
    /// Date the entry applies to
    pub date: NaiveDate,
}

/// A new entry as submitted by the form, before the backend assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub kind: EntryKind,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

/// Income and expense entries fetched (and cached) as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    pub income: Vec<Entry>,
    pub expenses: Vec<Entry>,
}

impl BudgetSnapshot {
    /// Sum of all income amounts.
    pub fn total_income(&self) -> f64 {
        self.income.iter().map(|e| e.amount).sum()
    }

    /// Sum of all expense amounts.
    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Income minus expenses.
    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }

    /// All entries tagged with their kind, newest first.
    ///
    /// This is the flattened ledger the entry list renders; ties on date keep
    /// income before expenses.
    pub fn ledger(&self) -> Vec<(EntryKind, &Entry)> {
        let mut rows: Vec<(EntryKind, &Entry)> = self
            .income
            .iter()
            .map(|e| (EntryKind::Income, e))
            .chain(self.expenses.iter().map(|e| (EntryKind::Expense, e)))
            .collect();
        rows.sort_by(|a, b| b.1.date.cmp(&a.1.date));
        rows
    }
}

/// A historical or current pay period with its aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPeriod {
    pub id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: f64,
    pub total_expenses: f64,
    pub remaining: f64,
    pub is_current: bool,
}

/// Returns the period flagged as current, if any.
///
/// Storage does not enforce that at most one period carries the flag; when
/// several do, the first wins and the duplication is logged so it stays
/// observable.
pub fn current_period(periods: &[PayPeriod]) -> Option<&PayPeriod> {
    let flagged = periods.iter().filter(|p| p.is_current).count();
    if flagged > 1 {
        debug!(flagged, "multiple pay periods flagged as current");
    }
    periods.iter().find(|p| p.is_current)
}

/// Direction of a savings entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsEntryKind {
    Deposit,
    Withdrawal,
}

/// A single deposit into or withdrawal from savings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsEntry {
    pub id: u64,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: SavingsEntryKind,
}

/// Savings goal and the entries contributing toward it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsState {
    pub goal: f64,
    pub entries: Vec<SavingsEntry>,
}

impl SavingsState {
    /// Net amount saved: deposits minus withdrawals.
    pub fn total_saved(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| match e.kind {
                SavingsEntryKind::Deposit => e.amount,
                SavingsEntryKind::Withdrawal => -e.amount,
            })
            .sum()
    }

    /// Progress toward the goal as a percentage, clamped to 0..=100.
    pub fn progress_percent(&self) -> f64 {
        if self.goal <= 0.0 {
            return 0.0;
        }
        (self.total_saved() / self.goal * 100.0).clamp(0.0, 100.0)
    }

    /// Amount still needed to reach the goal (zero once met).
    pub fn remaining_to_goal(&self) -> f64 {
        (self.goal - self.total_saved()).max(0.0)
    }
}

/// Error surfaced when a resource fetch fails.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The simulated backend rejected the request
    #[error("backend request failed: {0}")]
    Backend(#[from] ServiceError),
}

/// Loading/data/error state for one resource.
///
/// At steady state exactly one of `loading`, `data`, or `error` holds;
/// `loading` and `error` are mutually exclusive outcomes of a fetch cycle.
#[derive(Debug, Default)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl<T> FetchState<T> {
    /// Fresh idle state: no data, not loading, no error.
    pub fn new() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    /// Marks the start of a backend round trip, clearing any previous error.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Records a successful fetch.
    pub fn resolve(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
    }

    /// Records a failed fetch; existing data is dropped so the error is not
    /// masked by stale state.
    pub fn reject(&mut self, error: FetchError) {
        self.data = None;
        self.loading = false;
        self.error = Some(error);
    }
}
