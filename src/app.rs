//! Application state management for ledgerbook
//!
//! This module contains the main application state, handling keyboard input,
//! data loading through the coordinator, entry mutations, and transitions
//! between the different views.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cache::DataCache;
use crate::cli::{StartupConfig, View};
use crate::data::{
    BudgetService, DataCoordinator, EntryActions, EntryDraft, EntryKind,
};
use crate::validate::{validate_entry_form, FieldError};
use crate::virtualize::VirtualList;

/// Application lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// Data (or a primary error) is available and views are interactive
    Ready,
}

/// Which form field currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Kind,
    Amount,
    Category,
    Date,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Kind => FormField::Amount,
            FormField::Amount => FormField::Category,
            FormField::Category => FormField::Date,
            FormField::Date => FormField::Kind,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Kind => FormField::Date,
            FormField::Amount => FormField::Kind,
            FormField::Category => FormField::Amount,
            FormField::Date => FormField::Category,
        }
    }
}

/// In-progress add-entry form
#[derive(Debug)]
pub struct EntryForm {
    pub kind: EntryKind,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub focus: FormField,
    pub errors: Vec<FieldError>,
}

impl EntryForm {
    /// Fresh form defaulting to an expense dated today.
    pub fn new() -> Self {
        Self {
            kind: EntryKind::Expense,
            amount: String::new(),
            category: String::new(),
            date: Local::now().date_naive().to_string(),
            focus: FormField::Kind,
            errors: Vec::new(),
        }
    }

    /// Flips between income and expense, resetting the category since the
    /// suggestion lists differ per kind.
    fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            EntryKind::Income => EntryKind::Expense,
            EntryKind::Expense => EntryKind::Income,
        };
        self.category.clear();
    }

    /// The text buffer behind the focused field, if it is a text field.
    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Kind => None,
            FormField::Amount => Some(&mut self.amount),
            FormField::Category => Some(&mut self.category),
            FormField::Date => Some(&mut self.date),
        }
    }

    /// The error message for a field, if validation flagged it.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current lifecycle state
    pub state: AppState,
    /// View shown when ready
    pub active_view: View,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show the help overlay
    pub show_help: bool,
    /// Add-entry form, when open
    pub form: Option<EntryForm>,
    /// One-line status message (mutation results, errors)
    pub status: Option<String>,
    /// Index of the selected row in the entry ledger
    pub selected_entry: usize,
    /// Scroll/window state for the virtualized entry list
    pub entry_list: VirtualList,
    /// Timestamp of last data refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    coordinator: DataCoordinator,
    actions: EntryActions,
    pending_submit: Option<EntryDraft>,
    pending_delete: Option<(EntryKind, u64)>,
}

/// Entry rows are one terminal line tall.
const ENTRY_ROW_HEIGHT: usize = 1;

/// Fallback viewport before the first terminal measurement.
const DEFAULT_VIEWPORT_ROWS: usize = 20;

impl App {
    /// Creates a new App instance with default configuration.
    pub fn new() -> Self {
        Self::with_startup_config(StartupConfig::default())
    }

    /// Creates a new App instance with the given startup configuration.
    pub fn with_startup_config(config: StartupConfig) -> Self {
        let service = BudgetService::new();
        let cache = DataCache::new(config.cache_max_age);
        Self::assemble(service, cache, config)
    }

    /// Creates an App over explicit service/cache instances (for tests).
    #[cfg(test)]
    pub fn with_parts(service: BudgetService, cache: DataCache, config: StartupConfig) -> Self {
        Self::assemble(service, cache, config)
    }

    fn assemble(service: BudgetService, cache: DataCache, config: StartupConfig) -> Self {
        Self {
            state: AppState::Loading,
            active_view: config.initial_view,
            should_quit: false,
            show_help: false,
            form: None,
            status: None,
            selected_entry: 0,
            entry_list: VirtualList::new(ENTRY_ROW_HEIGHT, DEFAULT_VIEWPORT_ROWS),
            last_refresh: None,
            refresh_requested: false,
            coordinator: DataCoordinator::new(service.clone(), cache.clone()),
            actions: EntryActions::new(service, cache),
            pending_submit: None,
            pending_delete: None,
        }
    }

    /// Read access to the combined data surface for the views.
    pub fn coordinator(&self) -> &DataCoordinator {
        &self.coordinator
    }

    /// True while a mutation round trip is in flight.
    pub fn mutation_in_flight(&self) -> bool {
        self.actions.loading
    }

    /// Number of rows in the flattened entry ledger.
    pub fn ledger_len(&self) -> usize {
        self.coordinator
            .budget_data()
            .map(|b| b.ledger().len())
            .unwrap_or(0)
    }

    /// The kind and id of the selected ledger row, if any.
    pub fn selected_ledger_entry(&self) -> Option<(EntryKind, u64)> {
        let budget = self.coordinator.budget_data()?;
        let ledger = budget.ledger();
        ledger
            .get(self.selected_entry)
            .map(|(kind, entry)| (*kind, entry.id))
    }

    /// Updates the entry list's viewport to the rows currently available.
    pub fn set_entry_viewport(&mut self, rows: usize) {
        self.entry_list.set_viewport_height(rows * ENTRY_ROW_HEIGHT);
    }

    /// Loads all resources through the coordinator and leaves Loading state.
    pub async fn load_all_data(&mut self) {
        self.coordinator.load_all().await;
        self.last_refresh = Some(Local::now());
        self.clamp_selection();
        self.state = AppState::Ready;
    }

    /// Full resync: invalidates the cache and refetches everything.
    pub async fn refresh_data(&mut self) {
        self.refresh_requested = false;
        self.status = None;
        self.coordinator.refresh().await;
        self.last_refresh = Some(Local::now());
        self.clamp_selection();
    }

    /// Takes the draft queued by a form submit, if any.
    pub fn take_pending_submit(&mut self) -> Option<EntryDraft> {
        self.pending_submit.take()
    }

    /// Takes the delete request queued from the entries view, if any.
    pub fn take_pending_delete(&mut self) -> Option<(EntryKind, u64)> {
        self.pending_delete.take()
    }

    /// Runs a queued add-entry mutation and reloads on success.
    ///
    /// On failure the form stays open and editable with the error shown in
    /// the status line; nothing was applied optimistically, so there is
    /// nothing to roll back.
    pub async fn submit_entry(&mut self, draft: EntryDraft) {
        let kind = draft.kind;
        let amount = draft.amount;
        match self.actions.add_entry(draft).await {
            Ok(_) => {
                self.form = None;
                self.status = Some(format!("Added {} of ${:.2}", kind.label().to_lowercase(), amount));
                self.load_all_data().await;
            }
            Err(e) => {
                self.status = Some(format!("Failed to add entry: {}", e));
            }
        }
    }

    /// Runs a queued delete mutation and reloads on success.
    pub async fn delete_entry(&mut self, kind: EntryKind, id: u64) {
        match self.actions.delete_entry(kind, id).await {
            Ok(()) => {
                self.status = Some(format!("Deleted {} entry", kind.label().to_lowercase()));
                self.load_all_data().await;
            }
            Err(e) => {
                self.status = Some(format!("Failed to delete entry: {}", e));
            }
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `Tab` / `1`-`4`: Switch views
    /// - `Up`/`k`, `Down`/`j`: Move selection in the entries view
    /// - `g`/`G`: Jump to the first/last entry
    /// - `a`: Open the add-entry form
    /// - `d`: Delete the selected entry
    /// - `r`: Refresh all data
    /// - `?`: Toggle the help overlay
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        if self.form.is_some() {
            self.handle_form_key(key_event);
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Ready => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Tab => {
                    self.cycle_view();
                }
                KeyCode::Char('1') => self.active_view = View::Overview,
                KeyCode::Char('2') => self.active_view = View::Entries,
                KeyCode::Char('3') => self.active_view = View::PayPeriods,
                KeyCode::Char('4') => self.active_view = View::Savings,
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Char('g') => {
                    self.selected_entry = 0;
                    self.entry_list.scroll_to_index(0, self.ledger_len());
                }
                KeyCode::Char('G') => {
                    let count = self.ledger_len();
                    if count > 0 {
                        self.selected_entry = count - 1;
                        self.scroll_selection_into_view();
                    }
                }
                KeyCode::Char('a') => {
                    self.form = Some(EntryForm::new());
                    self.status = None;
                }
                KeyCode::Char('d') => {
                    if self.active_view == View::Entries {
                        self.pending_delete = self.selected_ledger_entry();
                    }
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    fn handle_form_key(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Esc {
            self.form = None;
            return;
        }

        let Some(form) = self.form.as_mut() else {
            return;
        };

        match key_event.code {
            KeyCode::Enter => {
                match validate_entry_form(form.kind, &form.amount, &form.category, &form.date) {
                    Ok(draft) => {
                        form.errors.clear();
                        self.pending_submit = Some(draft);
                    }
                    Err(errors) => {
                        form.errors = errors;
                    }
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                form.focus = form.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focus = form.focus.prev();
            }
            KeyCode::Left | KeyCode::Right => {
                if form.focus == FormField::Kind {
                    form.toggle_kind();
                }
            }
            KeyCode::Backspace => {
                if let Some(value) = form.focused_text_mut() {
                    value.pop();
                }
            }
            KeyCode::Char(c) => {
                if form.focus == FormField::Kind {
                    match c {
                        'i' => {
                            form.kind = EntryKind::Income;
                            form.category.clear();
                        }
                        'e' => {
                            form.kind = EntryKind::Expense;
                            form.category.clear();
                        }
                        _ => {}
                    }
                } else if let Some(value) = form.focused_text_mut() {
                    value.push(c);
                }
            }
            _ => {}
        }
    }

    fn cycle_view(&mut self) {
        self.active_view = match self.active_view {
            View::Overview => View::Entries,
            View::Entries => View::PayPeriods,
            View::PayPeriods => View::Savings,
            View::Savings => View::Overview,
        };
    }

    fn move_selection_up(&mut self) {
        if self.selected_entry > 0 {
            self.selected_entry -= 1;
            self.scroll_selection_into_view();
        }
    }

    fn move_selection_down(&mut self) {
        let count = self.ledger_len();
        if count > 0 && self.selected_entry + 1 < count {
            self.selected_entry += 1;
            self.scroll_selection_into_view();
        }
    }

    /// Adjusts the scroll offset so the selected row stays in the viewport.
    fn scroll_selection_into_view(&mut self) {
        let count = self.ledger_len();
        let top = self.selected_entry * ENTRY_ROW_HEIGHT;
        let bottom = top + ENTRY_ROW_HEIGHT;
        let offset = self.entry_list.scroll_offset();
        let viewport = self.entry_list.viewport_height();

        if top < offset {
            self.entry_list.scroll_to_index(self.selected_entry, count);
        } else if bottom > offset + viewport {
            self.entry_list
                .scroll_by((bottom - (offset + viewport)) as isize, count);
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.ledger_len();
        if count == 0 {
            self.selected_entry = 0;
        } else if self.selected_entry >= count {
            self.selected_entry = count - 1;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
