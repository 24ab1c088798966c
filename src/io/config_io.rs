use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::info;

use crate::io::state::atomic_write;
use crate::model::config::{ConfigError, DEFAULT_TEMPLATE, TrackerConfig};
use crate::tracker::action::Bindings;

/// `<config dir>/randotrack/tracker.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("randotrack"))
        .unwrap_or_default()
        .join("tracker.toml")
}

fn read_text(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load tracker.toml, falling back to the built-in template when the file
/// does not exist
pub fn load_config(path: &Path) -> Result<TrackerConfig, ConfigError> {
    if !path.exists() {
        info!(path = %path.display(), "no config file, using built-in defaults");
        return TrackerConfig::builtin();
    }
    TrackerConfig::from_toml(&read_text(path)?)
}

/// Write the built-in template to `path`
pub fn write_template(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    atomic_write(path, DEFAULT_TEMPLATE.as_bytes())?;
    Ok(())
}

/// Read the config as a toml_edit document for format-preserving edits.
/// A missing file starts from the built-in template.
pub fn read_document(path: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let text = if path.exists() {
        read_text(path)?
    } else {
        DEFAULT_TEMPLATE.to_string()
    };
    Ok(text.parse()?)
}

/// Bind `key` to `action` in the document, replacing any previous binding
pub fn set_bind(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    action: &str,
) -> Result<(), ConfigError> {
    let single: IndexMap<String, String> = [(key.to_string(), action.to_string())].into();
    Bindings::from_config(&single)?;

    if !doc.contains_key("binds") {
        doc["binds"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["binds"][key] = toml_edit::value(action);
    Ok(())
}

/// Validate the edited document and write it back, preserving formatting
pub fn write_document(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let text = doc.to_string();
    TrackerConfig::from_toml(&text)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    atomic_write(path, text.as_bytes())?;
    Ok(())
}
