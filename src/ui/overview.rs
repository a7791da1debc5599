//! Overview screen rendering
//!
//! The landing view: aggregate income/expense totals, the current pay period,
//! and a one-line savings summary.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::current_period;

use super::{format_amount, render_footer, render_primary_error};

/// Renders the overview screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Summary content
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    if let Some(err) = app.coordinator().error() {
        render_primary_error(frame, chunks[1], &err.to_string());
    } else {
        render_summary(frame, app, chunks[1]);
    }

    render_footer(
        frame,
        chunks[2],
        app,
        &[
            ("Tab/1-4", "Views"),
            ("a", "Add entry"),
            ("r", "Refresh"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    );
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let date_str = chrono::Local::now().format("%a %b %d, %Y").to_string();
    let lines = vec![
        Line::from(vec![
            Span::styled(
                "LEDGERBOOK",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(date_str, Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", app.active_view.title()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(Span::styled(
            "─".repeat(area.width.saturating_sub(1) as usize),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Overview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = Vec::new();

    match app.coordinator().budget_data() {
        Some(budget) => {
            let balance = budget.balance();
            let balance_color = if balance >= 0.0 { Color::Green } else { Color::Red };
            lines.push(Line::from(vec![
                Span::raw("  Income    "),
                Span::styled(
                    format_amount(budget.total_income()),
                    Style::default().fg(Color::Green),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  Expenses  "),
                Span::styled(
                    format_amount(budget.total_expenses()),
                    Style::default().fg(Color::Red),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  Balance   "),
                Span::styled(
                    format_amount(balance),
                    Style::default()
                        .fg(balance_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  Loading budget data...",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(Line::from(""));

    // Current pay period (secondary resource: absence is shown, not an error)
    match app.coordinator().pay_periods().and_then(current_period) {
        Some(period) => {
            let remaining_color = if period.remaining >= 0.0 {
                Color::Green
            } else {
                Color::Red
            };
            lines.push(Line::from(vec![
                Span::styled("  Current period  ", Style::default().fg(Color::White)),
                Span::raw(format!("{} → {}  ", period.start_date, period.end_date)),
                Span::styled(
                    format!("{} left", format_amount(period.remaining)),
                    Style::default().fg(remaining_color),
                ),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  No current pay period",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    // Savings summary line
    match app.coordinator().savings_data() {
        Some(savings) => {
            lines.push(Line::from(vec![
                Span::styled("  Savings  ", Style::default().fg(Color::White)),
                Span::styled(
                    format!(
                        "{} of {} ({:.0}%)",
                        format_amount(savings.total_saved()),
                        format_amount(savings.goal),
                        savings.progress_percent()
                    ),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  Savings data unavailable",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
