use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::cli::output::item_detail;
use crate::tui::app::App;

use super::fit_width;

/// Width of one item cell, including the gap to the next column
const CELL_W: u16 = 26;

/// Render the catalog as a column-major grid of one-line cells and record
/// each cell's area for mouse hit testing
pub fn render_item_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    app.item_areas.clear();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let columns = (area.width / CELL_W).max(1);
    let cell_w = CELL_W.min(area.width);
    let capacity = columns as usize * area.height as usize;

    for (index, item) in app.tracker.items().iter().enumerate().take(capacity) {
        let col = (index / area.height as usize) as u16;
        let row = (index % area.height as usize) as u16;
        let cell = Rect::new(
            area.x + col * cell_w,
            area.y + row,
            cell_w.saturating_sub(1).max(1),
            1,
        );

        let mut text = item.name.clone();
        if let Some(detail) = item_detail(item) {
            text.push(' ');
            text.push_str(&detail);
        }
        let reward = app.tracker.reward_name(item).map(|r| format!(" [{r}]"));
        let reward_w = reward.as_deref().map_or(0, |r| r.width());
        let text_w = (cell.width as usize).saturating_sub(reward_w);

        let mut spans = vec![Span::styled(
            fit_width(&text, text_w),
            app.theme.item_style(item),
        )];
        if let Some(reward) = reward {
            spans.push(Span::styled(reward, app.theme.reward_style()));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.background)),
            cell,
        );
        app.item_areas.push((cell, index));
    }
}
