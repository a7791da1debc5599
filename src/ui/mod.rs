//! UI rendering module for ledgerbook
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components. Every view
//! consumes only the coordinator's read surface plus the app's own UI state.

pub mod entries;
pub mod entry_form;
pub mod help_overlay;
pub mod overview;
pub mod pay_periods;
pub mod savings;

pub use entries::render as render_entries;
pub use entry_form::render as render_entry_form;
pub use help_overlay::render as render_help_overlay;
pub use overview::render as render_overview;
pub use pay_periods::render as render_pay_periods;
pub use savings::render as render_savings;

use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Formats a dollar amount for display.
pub(crate) fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Renders the blocking error screen shown when the primary resource failed.
pub(crate) fn render_primary_error(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Could not load budget data",
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to retry or q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the one-line footer: key hints, then status or data freshness.
pub(crate) fn render_footer(frame: &mut Frame, area: Rect, app: &App, keys: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(format!(" {}  ", label)));
    }

    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("│ {}", status),
            Style::default().fg(Color::Cyan),
        ));
    } else if let Some(last_refresh) = app.last_refresh {
        let elapsed = Local::now() - last_refresh;
        let mins_ago = elapsed.num_minutes();
        let freshness = if mins_ago < 1 {
            "│ Data: just now".to_string()
        } else if mins_ago < 60 {
            format!("│ Data: {}m ago", mins_ago)
        } else {
            format!("│ Data: {}h ago", elapsed.num_hours())
        };
        spans.push(Span::styled(freshness, Style::default().fg(Color::DarkGray)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
