//! Add-entry form overlay
//!
//! Renders a centered modal form over the current view. Focus moves with
//! Tab/Shift-Tab; validation errors appear inline under their fields and the
//! form stays editable after a failed submit.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, FormField};
use crate::validate::category_options;

/// Renders the entry form overlay, if one is open
pub fn render(frame: &mut Frame, app: &App) {
    let Some(form) = &app.form else {
        return;
    };

    let area = frame.area();
    let overlay_area = centered_rect(54, 18, area);

    frame.render_widget(Clear, overlay_area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Add Budget Entry",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    // Kind selector
    lines.push(field_line(
        "Type",
        &format!("\u{25C2} {} \u{25B8}", form.kind.label()),
        form.focus == FormField::Kind,
    ));
    lines.push(Line::from(""));

    // Text fields with their validation errors
    lines.push(field_line("Amount", &form.amount, form.focus == FormField::Amount));
    push_error(&mut lines, form.error_for("amount"));

    lines.push(field_line(
        "Category",
        &form.category,
        form.focus == FormField::Category,
    ));
    push_error(&mut lines, form.error_for("category"));

    lines.push(field_line("Date", &form.date, form.focus == FormField::Date));
    push_error(&mut lines, form.error_for("date"));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  e.g. {}", category_options(form.kind).join(", ")),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    if app.mutation_in_flight() {
        lines.push(Line::from(Span::styled(
            "  Saving...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  Enter save · Tab next field · i/e type · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .title(" New Entry ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

/// Creates a label/value line, highlighting the focused field
fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if focused { "_" } else { "" };

    Line::from(vec![
        Span::styled(format!("  {:<10}", label), label_style),
        Span::raw(format!("{}{}", value, cursor)),
    ])
}

fn push_error(lines: &mut Vec<Line<'static>>, error: Option<&str>) {
    match error {
        Some(message) => lines.push(Line::from(Span::styled(
            format!("  {:<10}{}", "", message),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
