//! Pay period history screen rendering

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

use super::{format_amount, render_footer};

/// Renders the pay periods screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .title(" Pay Periods ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = Vec::new();
    match app.coordinator().pay_periods() {
        Some(periods) if !periods.is_empty() => {
            for period in periods {
                let marker = if period.is_current { "\u{25B8} " } else { "  " };
                let remaining_color = if period.remaining >= 0.0 {
                    Color::Green
                } else {
                    Color::Red
                };
                let name_style = if period.is_current {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };

                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!("{} → {}", period.start_date, period.end_date),
                        name_style,
                    ),
                    Span::raw("   in "),
                    Span::styled(
                        format_amount(period.total_income),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw("  out "),
                    Span::styled(
                        format_amount(period.total_expenses),
                        Style::default().fg(Color::Red),
                    ),
                    Span::raw("  left "),
                    Span::styled(
                        format_amount(period.remaining),
                        Style::default().fg(remaining_color),
                    ),
                ]));
            }
        }
        // Secondary resource: absence renders as a quiet placeholder
        _ => {
            lines.push(Line::from(Span::styled(
                "  Pay period data unavailable",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    render_footer(
        frame,
        chunks[1],
        app,
        &[("Tab/1-4", "Views"), ("r", "Refresh"), ("q", "Quit")],
    );
}
