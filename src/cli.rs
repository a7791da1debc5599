//! Command-line interface parsing for ledgerbook
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --view flag for opening a specific view directly and --cache-ttl for
//! overriding how long fetched data stays fresh.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::cache::DEFAULT_MAX_AGE_SECS;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified view name is not recognized
    #[error("Invalid view: '{0}'. Valid views: overview, entries, periods, savings")]
    InvalidView(String),
}

/// The main views the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Overview,
    Entries,
    PayPeriods,
    Savings,
}

impl View {
    /// Parses a view name as given on the command line.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "overview" | "summary" => Some(View::Overview),
            "entries" | "ledger" => Some(View::Entries),
            "periods" | "pay-periods" | "payperiods" => Some(View::PayPeriods),
            "savings" | "goal" => Some(View::Savings),
            _ => None,
        }
    }

    /// Title shown in the view's border.
    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Entries => "Entries",
            View::PayPeriods => "Pay Periods",
            View::Savings => "Savings",
        }
    }
}

/// Ledgerbook - Track income, expenses, pay periods, and savings goals
#[derive(Parser, Debug)]
#[command(name = "ledgerbook")]
#[command(about = "Terminal budget tracker with pay periods and savings goals")]
#[command(version)]
pub struct Cli {
    /// View to open at startup
    ///
    /// Examples:
    ///   ledgerbook                     # Open the overview
    ///   ledgerbook --view entries      # Open the entry ledger
    ///   ledgerbook --view savings      # Open the savings goal view
    ///
    /// Valid views: overview, entries, periods, savings
    #[arg(long, value_name = "VIEW")]
    pub view: Option<String>,

    /// How long fetched data stays fresh, in seconds (default 300)
    #[arg(long, value_name = "SECONDS")]
    pub cache_ttl: Option<u64>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// View shown once the initial load completes
    pub initial_view: View,
    /// TTL for the session cache
    pub cache_max_age: Duration,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_view: View::default(),
            cache_max_age: Duration::from_secs(DEFAULT_MAX_AGE_SECS),
        }
    }
}

/// Parses a view string argument into a View enum.
///
/// # Arguments
/// * `s` - The view string from CLI
///
/// # Returns
/// * `Ok(View)` if the string matches a valid view
/// * `Err(CliError::InvalidView)` if the string doesn't match
pub fn parse_view_arg(s: &str) -> Result<View, CliError> {
    View::from_str(s).ok_or_else(|| CliError::InvalidView(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_view = match &cli.view {
            None => View::default(),
            Some(view_str) => parse_view_arg(view_str)?,
        };

        let cache_max_age = cli
            .cache_ttl
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_MAX_AGE_SECS));

        Ok(StartupConfig {
            initial_view,
            cache_max_age,
        })
    }
}
