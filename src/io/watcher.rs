use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches tracker.toml for edits made outside the running tracker.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<PathBuf>,
}

impl ConfigWatcher {
    /// Start watching the directory holding `config_path`.
    /// Only events for the config file itself are reported.
    pub fn start(config_path: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let target = config_path.to_path_buf();
        let dir = match config_path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                // Editors often save by create+rename, so creates count too
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) => {}
                    _ => return,
                }

                if event.paths.iter().any(|p| is_target(p, &target)) {
                    let _ = tx.send(target.clone());
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(ConfigWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking: whether the config changed since the last poll.
    /// Drains all queued events.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}

fn is_target(path: &Path, target: &Path) -> bool {
    path == target || (path.file_name() == target.file_name() && path.ends_with(target))
}
