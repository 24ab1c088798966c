use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::config::SaveConfig;
use crate::model::hints::HintRegistry;
use crate::model::item::Item;
use crate::tracker::undo::LedgerEntry;

/// Error type for the saved state file
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("no saved state at {0}")]
    Missing(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse saved state: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("saved state is inconsistent: {0}")]
    Inconsistent(String),
}

/// Everything persisted between sessions (state.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub hints: HintRegistry,
    /// Oldest first
    #[serde(default)]
    pub undo_stack: Vec<LedgerEntry>,
    #[serde(default)]
    pub redo_stack: Vec<LedgerEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Location of the state file, plus reading and writing it
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StateStore { path: path.into() }
    }

    /// Pick the state file: explicit override, then `[save].path`, then the
    /// user cache directory
    pub fn resolve(override_path: Option<PathBuf>, save: &SaveConfig) -> Self {
        let path = override_path
            .or_else(|| save.path.clone())
            .unwrap_or_else(default_state_path);
        StateStore::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Log file that sits next to the state file
    pub fn log_path(&self) -> PathBuf {
        self.path.with_file_name("randotrack.log")
    }

    pub fn read(&self) -> Result<SavedState, StateError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StateError::Missing(self.path.clone()));
            }
            Err(source) => {
                return Err(StateError::ReadError {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Write `state` stamped with the current time
    pub fn write(&self, state: &SavedState) -> Result<(), StateError> {
        let stamped = SavedState {
            saved_at: Some(Utc::now()),
            ..state.clone()
        };
        let content = serde_json::to_string_pretty(&stamped)?;
        let write_err = |source| StateError::WriteError {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        atomic_write(&self.path, content.as_bytes()).map_err(write_err)
    }
}

/// `<cache dir>/randotrack/state.json`, or the working directory when the
/// platform has no cache dir
pub fn default_state_path() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("randotrack"))
        .unwrap_or_default()
        .join("state.json")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
