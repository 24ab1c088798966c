use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tracker::input::InputState;
use crate::tui::app::App;

/// Render the status row (bottom of screen): gesture state on the left,
/// notice or history depth on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let tracker = &app.tracker;

    let mut spans = Vec::new();
    if tracker.downgrade_next() {
        spans.push(Span::styled(
            "[down] ",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    match tracker.input_state() {
        InputState::TextInput { .. } => {
            spans.push(Span::styled(
                format!("{} {}", tracker.input_state().label(), tracker.text_buffer()),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            )); // ▌ cursor
        }
        InputState::DungeonInput { cursor } => {
            let medallion = tracker
                .config()
                .item_tracker
                .medallion_order
                .get(*cursor)
                .map(String::as_str)
                .unwrap_or("?");
            spans.push(Span::styled(
                format!("{}: {medallion}", tracker.input_state().label()),
                Style::default().fg(app.theme.cyan).bg(bg),
            ));
        }
        state => spans.push(Span::styled(
            state.label(),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    }

    let hint = match &app.message {
        Some(msg) => msg.clone(),
        None => format!(
            "undo {} redo {}",
            tracker.ledger().undo_entries().len(),
            tracker.ledger().redo_entries().len()
        ),
    };
    let content_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let hint_width = hint.width();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.purple).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
