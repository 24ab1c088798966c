use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::io::autosave::SaveDebouncer;
use crate::io::config_io;
use crate::io::logging;
use crate::io::state::StateStore;
use crate::io::watcher::ConfigWatcher;
use crate::tracker::Tracker;

use super::input;
use super::render;
use super::theme::Theme;

/// Main application state
pub struct App {
    pub tracker: Tracker,
    pub store: StateStore,
    pub debouncer: SaveDebouncer,
    pub config_path: PathBuf,
    pub theme: Theme,
    pub should_quit: bool,
    /// Screen area of each rendered item cell, for mouse hit testing
    pub item_areas: Vec<(Rect, usize)>,
    /// One-line notice shown in the status row until the next key press
    pub message: Option<String>,
}

impl App {
    pub fn new(tracker: Tracker, store: StateStore, config_path: PathBuf) -> Self {
        let debouncer = SaveDebouncer::from_config(&tracker.config().save, Instant::now());
        App {
            tracker,
            store,
            debouncer,
            config_path,
            theme: Theme::default(),
            should_quit: false,
            item_areas: Vec::new(),
            message: None,
        }
    }

    /// Note that the tracker state changed and needs saving
    pub fn touch(&mut self) {
        self.debouncer.mark_dirty(Instant::now());
    }

    /// Item under a screen position
    pub fn item_at(&self, column: u16, row: u16) -> Option<usize> {
        self.item_areas
            .iter()
            .find(|(r, _)| {
                column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|(_, index)| *index)
    }

    /// Write state now, regardless of the debouncer
    pub fn save_now(&mut self) {
        match self.tracker.save(&self.store) {
            Ok(()) => self.debouncer.saved(Instant::now()),
            Err(e) => {
                warn!(error = %e, "save failed");
                self.message = Some(format!("save failed: {e}"));
            }
        }
    }

    /// Write state if the debouncer says it is time
    pub fn save_if_due(&mut self) {
        if self.debouncer.should_save(Instant::now()) {
            self.save_now();
        }
    }

    /// Re-read tracker.toml after an external edit
    pub fn reload_config(&mut self) {
        let result = config_io::load_config(&self.config_path)
            .and_then(|config| self.tracker.reload_config(config));
        match result {
            Ok(()) => self.message = Some("config reloaded".into()),
            Err(e) => {
                warn!(error = %e, "config reload failed");
                self.message = Some(format!("config error: {e}"));
            }
        }
    }
}

pub fn run(config_path: &Path, state_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(config_path)?;
    let store = StateStore::resolve(state_path, &config.save);
    logging::init_file(&store.log_path())?;

    let mut tracker = Tracker::new(config)?;
    tracker.load(&store);
    let mut app = App::new(tracker, store, config_path.to_path_buf());

    let watcher = match ConfigWatcher::start(config_path) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "not watching config");
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    app.save_now();
    info!("tracker closed");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&ConfigWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if watcher.is_some_and(|w| w.poll()) {
            app.reload_config();
        }
        app.save_if_due();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
