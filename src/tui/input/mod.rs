use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::app::App;

/// Translate a key press into tracker commands
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            if app.tracker.is_idle() {
                app.should_quit = true;
            } else {
                app.tracker.cancel();
            }
        }
        KeyCode::Enter => {
            app.tracker.submit();
            app.touch();
        }
        KeyCode::Backspace => app.tracker.backspace(),
        KeyCode::Delete => {
            app.tracker.reset();
            app.save_now();
            app.message = Some("tracker reset".into());
        }
        KeyCode::Char(c) => {
            let mut buf = [0u8; 4];
            app.tracker.input(c.encode_utf8(&mut buf));
            app.touch();
        }
        _ => {}
    }
}

/// Clicks upgrade (left) or downgrade (right); the wheel scrolls the item
/// under the pointer
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let Some(index) = app.item_at(mouse.column, mouse.row) else {
        return;
    };
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.tracker.click_left(index);
        }
        MouseEventKind::Down(MouseButton::Right) => {
            app.tracker.click_right(index);
        }
        MouseEventKind::ScrollUp => app.tracker.wheel(index, true),
        MouseEventKind::ScrollDown => app.tracker.wheel(index, false),
        _ => return,
    }
    app.touch();
}
