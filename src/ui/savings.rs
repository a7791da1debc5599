//! Savings goal screen rendering
//!
//! Shows progress toward the savings goal as a gauge plus the most recent
//! deposits and withdrawals.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::SavingsEntryKind;

use super::{format_amount, render_footer};

/// How many recent savings entries to list under the gauge.
const RECENT_ENTRIES: usize = 8;

/// Renders the savings screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress gauge
            Constraint::Min(3),    // Recent entries
            Constraint::Length(1), // Footer
        ])
        .split(area);

    match app.coordinator().savings_data() {
        Some(savings) => {
            let progress = savings.progress_percent();
            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .title(format!(
                            " Savings — {} of {} ",
                            format_amount(savings.total_saved()),
                            format_amount(savings.goal)
                        ))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .gauge_style(Style::default().fg(Color::Green))
                .percent(progress as u16);
            frame.render_widget(gauge, chunks[0]);

            let mut lines = vec![Line::from(Span::styled(
                format!("  {} still to go", format_amount(savings.remaining_to_goal())),
                Style::default().fg(Color::Gray),
            ))];
            lines.push(Line::from(""));

            let mut entries: Vec<_> = savings.entries.iter().collect();
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            for entry in entries.into_iter().take(RECENT_ENTRIES) {
                let (sign, color) = match entry.kind {
                    SavingsEntryKind::Deposit => ("+", Color::Green),
                    SavingsEntryKind::Withdrawal => ("-", Color::Red),
                };
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(entry.date.to_string(), Style::default().fg(Color::Gray)),
                    Span::raw("  "),
                    Span::styled(
                        format!("{}{}", sign, format_amount(entry.amount)),
                        Style::default().fg(color),
                    ),
                ]));
            }

            let block = Block::default()
                .title(" Recent Activity ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan));
            frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
        }
        None => {
            let block = Block::default()
                .title(" Savings ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan));
            let placeholder = Paragraph::new(Line::from(Span::styled(
                "  Savings data unavailable",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(placeholder, chunks[1]);

            let empty = Paragraph::new(Line::from(Span::styled(
                " Savings ",
                Style::default().add_modifier(Modifier::DIM),
            )));
            frame.render_widget(empty, chunks[0]);
        }
    }

    render_footer(
        frame,
        chunks[2],
        app,
        &[("Tab/1-4", "Views"), ("r", "Refresh"), ("q", "Quit")],
    );
}
