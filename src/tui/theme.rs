use ratatui::style::{Color, Modifier, Style};

use crate::model::item::Item;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x5A, 0x55, 0x80),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
        }
    }
}

impl Theme {
    /// Collected items are bright, maxed ones green, the rest dimmed
    pub fn item_style(&self, item: &Item) -> Style {
        let fg = if !item.enabled {
            self.dim
        } else if (item.count_max > 0 && item.count >= item.count_max)
            || (item.stage_count() > 1 && item.upgrade_index + 1 == item.stage_count())
        {
            self.green
        } else {
            self.text_bright
        };
        Style::default().fg(fg).bg(self.background)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn reward_style(&self) -> Style {
        Style::default().fg(self.yellow).bg(self.background)
    }
}
