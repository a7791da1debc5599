//! Entry ledger screen rendering
//!
//! Renders the flattened income/expense ledger as a virtualized list: only
//! the rows inside the current scroll window are turned into widgets, so the
//! view stays cheap no matter how long the ledger grows.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::EntryKind;

use super::{format_amount, render_footer, render_primary_error};

/// Rows taken up by chrome around the list (header, borders, footer); the
/// main loop subtracts this when sizing the virtual viewport.
pub const CHROME_ROWS: u16 = 5;

/// Renders the entries screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Entry list
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    if let Some(err) = app.coordinator().error() {
        render_primary_error(frame, chunks[1], &err.to_string());
    } else {
        render_list(frame, app, chunks[1]);
    }

    render_footer(
        frame,
        chunks[2],
        app,
        &[
            ("↑/↓", "Navigate"),
            ("a", "Add"),
            ("d", "Delete"),
            ("g/G", "Top/Bottom"),
            ("r", "Refresh"),
            ("q", "Quit"),
        ],
    );
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.ledger_len();
    let window = app.entry_list.window(count);
    let position = if count == 0 {
        "no entries".to_string()
    } else {
        format!("{}-{} of {}", window.start + 1, window.end, count)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "LEDGERBOOK",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  Entries  "),
            Span::styled(position, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            "─".repeat(area.width.saturating_sub(1) as usize),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Entries ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(budget) = app.coordinator().budget_data() else {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "  Loading entries...",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let ledger = budget.ledger();
    if ledger.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "  No entries yet — press a to add one",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    // Only the window produced by the virtualizer is rendered.
    let mut lines = Vec::new();
    for visible in app.entry_list.visible_items(&ledger) {
        let (kind, entry) = visible.item;
        let is_selected = visible.index == app.selected_entry;

        let cursor = if is_selected { "\u{25B8} " } else { "  " };
        let cursor_style = if is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let (sign, amount_color) = match kind {
            EntryKind::Income => ("+", Color::Green),
            EntryKind::Expense => ("-", Color::Red),
        };

        let category_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(cursor, cursor_style),
            Span::styled(entry.date.to_string(), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(format!("{:<22}", entry.category), category_style),
            Span::styled(
                format!("{}{:>10}", sign, format_amount(entry.amount)),
                Style::default().fg(amount_color),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DataCache;
    use crate::cli::StartupConfig;
    use crate::data::service::ServiceDelays;
    use crate::data::BudgetService;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    async fn loaded_app() -> App {
        let service = BudgetService::with_delays(ServiceDelays::none());
        let cache = DataCache::new(Duration::from_secs(60));
        let mut app = App::with_parts(service, cache, StartupConfig::default());
        app.load_all_data().await;
        app
    }

    fn buffer_string(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_entries_render_with_categories_and_amounts() {
        let app = loaded_app().await;
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|frame| render(frame, &app)).unwrap();

        let content = buffer_string(&terminal);
        assert!(content.contains("Freelance"), "newest entry should render");
        assert!(content.contains("Housing"));
        assert!(content.contains("$1200.00"));
        assert!(content.contains("1-5 of 5"), "position indicator should render");
    }

    #[tokio::test]
    async fn test_selected_entry_has_cursor() {
        let app = loaded_app().await;
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|frame| render(frame, &app)).unwrap();

        let content = buffer_string(&terminal);
        assert!(content.contains("\u{25B8}"), "cursor indicator should render");
    }

    #[tokio::test]
    async fn test_only_windowed_rows_render_on_small_viewport() {
        let mut app = loaded_app().await;
        // Zero overscan and a 2-row viewport: the window holds rows 0..2
        app.entry_list = crate::virtualize::VirtualList::new(1, 2).with_overscan(0);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let content = buffer_string(&terminal);
        // Ledger is newest-first: Freelance (01-20), Salary (01-15), ...
        assert!(content.contains("Freelance"));
        assert!(content.contains("1-2 of 5"));
        assert!(
            !content.contains("Housing"),
            "rows outside the window must not render"
        );
    }

    #[test]
    fn test_placeholder_before_data_arrives() {
        let app = App::new();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|frame| render(frame, &app)).unwrap();

        let content = buffer_string(&terminal);
        assert!(content.contains("Loading entries"));
    }
}
