use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::state::StateStore;
use crate::model::config::TrackerConfig;
use crate::tracker::Tracker;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A small catalog: three items on one keypad zone, two medallions
pub const SMALL_CONFIG: &str = r#"
[binds]
"0" = "StartItemInput"
"." = "DowngradeNext"
"w" = "StartWothInput"
"a" = "StartAlwaysInput"
"1" = "BottomLeft"
"2" = "Bottom"
"3" = "BottomRight"

[item_tracker]
zone_items = [["Bow", "Progressive Hookshot", "Gold Skulltula Token"]]
dungeon_rewards = ["Deku Tree", "Fire Temple"]

[hint_tracker]
locations = ["Fire Temple", "Lost Woods"]
always_locations = ["Skull Mask", "Frog 2"]

[[items]]
name = "Bow"
capacity_progression = [30, 40, 50]

[[items]]
name = "Progressive Hookshot"
item_progression = ["Hookshot", "Longshot"]

[[items]]
name = "Gold Skulltula Token"
count_max = 100
count_step = 1

[[items]]
name = "Forest Medallion"
is_medallion = true

[[items]]
name = "Fire Medallion"
is_medallion = true
"#;

/// An App over [`SMALL_CONFIG`] saving into `dir`
pub fn small_app(dir: &TempDir) -> App {
    let tracker = Tracker::new(TrackerConfig::from_toml(SMALL_CONFIG).unwrap()).unwrap();
    let store = StateStore::new(dir.path().join("state.json"));
    App::new(tracker, store, dir.path().join("tracker.toml"))
}
