pub mod hint_panel;
pub mod item_grid;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::app::App;

/// Main render function: item grid | hint panel, status row below
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[0]);

    item_grid::render_item_grid(frame, app, columns[0]);
    hint_panel::render_hint_panel(frame, app, columns[1]);
    status_row::render_status_row(frame, app, rows[1]);
}

/// Truncate to `max_cells` terminal cells, marking the cut with `…`
pub(super) fn fit_width(s: &str, max_cells: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = UnicodeWidthStr::width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_width_keeps_short_text() {
        assert_eq!(fit_width("Bow", 5), "Bow");
        assert_eq!(fit_width("Bow", 3), "Bow");
    }

    #[test]
    fn fit_width_truncates() {
        assert_eq!(fit_width("Progressive Hookshot", 8), "Progres\u{2026}");
        assert_eq!(fit_width("Bow", 0), "");
        assert_eq!(fit_width("Bow", 1), "\u{2026}");
    }

    #[test]
    fn fit_width_counts_wide_chars() {
        assert_eq!(fit_width("日本語", 5), "日本\u{2026}");
    }
}
