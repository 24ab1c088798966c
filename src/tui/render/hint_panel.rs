use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::hints::HintKind;
use crate::tui::app::App;

use super::fit_width;

/// Render every hint category, with the always slots last
pub fn render_hint_panel(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let text_style = Style::default().fg(app.theme.text).bg(app.theme.background);
    let mut lines: Vec<Line> = Vec::new();

    for kind in [
        HintKind::Woth,
        HintKind::Goal,
        HintKind::Barren,
        HintKind::Sometimes,
    ] {
        lines.push(Line::from(Span::styled(
            fit_width(kind.label(), width),
            app.theme.heading_style(),
        )));
        for entry in app.tracker.hints().lines(kind) {
            lines.push(Line::from(Span::styled(
                fit_width(&format!("  {entry}"), width),
                text_style,
            )));
        }
    }

    lines.push(Line::from(Span::styled(
        fit_width(HintKind::Always.label(), width),
        app.theme.heading_style(),
    )));
    let locations = &app.tracker.config().hint_tracker.always_locations;
    for (location, text) in locations.iter().zip(app.tracker.hints().always.iter()) {
        let line = if text.is_empty() {
            format!("  {location}")
        } else {
            format!("  {location}: {text}")
        };
        let style = if text.is_empty() {
            Style::default().fg(app.theme.dim).bg(app.theme.background)
        } else {
            text_style
        };
        lines.push(Line::from(Span::styled(fit_width(&line, width), style)));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}
