use std::collections::HashSet;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::hints::{ALWAYS_SLOTS, HintKind};
use super::item::{Item, ProgressionKind};

/// Side length of the keypad grid
pub const ZONE_COUNT: usize = 9;

/// Built-in configuration, used when no tracker.toml exists
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/tracker.toml");

/// Error type for configuration loading and validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse tracker.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit tracker.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("bind key {0:?} must be exactly one character")]
    BadBindKey(String),
    #[error("unknown action {action:?} bound to {key:?}")]
    UnknownAction { key: String, action: String },
    #[error("zone grid must be at most 9x9")]
    GridTooLarge,
    #[error("dungeon reward table has {0} entries, at most 9 allowed")]
    RewardTableTooLarge(usize),
    #[error("{0} always locations configured, at most 8 allowed")]
    TooManyAlways(usize),
    #[error("item {0:?} is defined more than once")]
    DuplicateItem(String),
    #[error("item {name:?} has {stages} stages but {capacities} capacities")]
    ProgressionMismatch {
        name: String,
        stages: usize,
        capacities: usize,
    },
    #[error("item {0:?} is countable and also has upgrade stages")]
    ConflictingProgression(String),
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Whole tracker configuration (tracker.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Single character → action name
    #[serde(default)]
    pub binds: IndexMap<String, String>,
    #[serde(default)]
    pub item_tracker: ItemTrackerConfig,
    #[serde(default)]
    pub hint_tracker: HintTrackerConfig,
    #[serde(default)]
    pub save: SaveConfig,
    /// Item catalog, in display order
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemTrackerConfig {
    /// `zone_items[zone - 1][item - 1]`; short rows are padded with ""
    #[serde(default)]
    pub zone_items: Vec<Vec<String>>,
    /// Reward name per keypad zone, used by dungeon quick-entry
    #[serde(default)]
    pub dungeon_rewards: Vec<String>,
    /// Medallions visited in order during dungeon quick-entry
    #[serde(default)]
    pub medallion_order: Vec<String>,
    /// Items upgraded once per occurrence on a fresh tracker
    #[serde(default)]
    pub starting_items: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HintTrackerConfig {
    /// Regions and dungeons, matched against woth/barren text
    #[serde(default)]
    pub locations: Vec<String>,
    /// One entry per always slot, in slot order
    #[serde(default)]
    pub always_locations: Vec<String>,
    /// Whole-word shorthand expanded before matching ("dc" → "Dodongo's Cavern")
    #[serde(default)]
    pub abbreviations: IndexMap<String, String>,
    #[serde(default)]
    pub limits: HintLimits,
}

/// Optional caps on list hint categories; absent means unbounded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HintLimits {
    #[serde(default)]
    pub woth: Option<usize>,
    #[serde(default)]
    pub goal: Option<usize>,
    #[serde(default)]
    pub barren: Option<usize>,
    #[serde(default)]
    pub sometimes: Option<usize>,
}

impl HintLimits {
    pub fn for_kind(&self, kind: HintKind) -> Option<usize> {
        match kind {
            HintKind::Woth => self.woth,
            HintKind::Goal => self.goal,
            HintKind::Barren => self.barren,
            HintKind::Sometimes => self.sometimes,
            HintKind::Always => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Quiet period before a burst of changes is written
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Force a write when the last one is older than this
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
    /// State file location (default: user cache dir)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for SaveConfig {
    fn default() -> Self {
        SaveConfig {
            debounce_ms: default_debounce_ms(),
            max_age_secs: default_max_age_secs(),
            path: None,
        }
    }
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_max_age_secs() -> u64 {
    10
}

impl TrackerConfig {
    /// Parse and validate a tracker.toml document
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration shipped with the binary
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_TEMPLATE)
    }

    /// Structural checks. Names that do not resolve to catalog items are
    /// left to [`TrackerConfig::unknown_item_names`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::tracker::action::Bindings::from_config(&self.binds)?;

        let grid = &self.item_tracker.zone_items;
        if grid.len() > ZONE_COUNT || grid.iter().any(|row| row.len() > ZONE_COUNT) {
            return Err(ConfigError::GridTooLarge);
        }
        let rewards = self.item_tracker.dungeon_rewards.len();
        if rewards > ZONE_COUNT {
            return Err(ConfigError::RewardTableTooLarge(rewards));
        }
        let always = self.hint_tracker.always_locations.len();
        if always > ALWAYS_SLOTS {
            return Err(ConfigError::TooManyAlways(always));
        }

        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.name.as_str()) {
                return Err(ConfigError::DuplicateItem(item.name.clone()));
            }
            let stages = item.item_progression.len();
            let capacities = item.capacity_progression.len();
            if stages > 0 && capacities > 0 && stages != capacities {
                return Err(ConfigError::ProgressionMismatch {
                    name: item.name.clone(),
                    stages,
                    capacities,
                });
            }
            if item.kind() == ProgressionKind::Countable && item.stage_count() > 0 {
                return Err(ConfigError::ConflictingProgression(item.name.clone()));
            }
        }
        Ok(())
    }

    /// Names referenced by the grid, medallion order or starting items that
    /// are missing from the catalog, with where they were found
    pub fn unknown_item_names(&self) -> Vec<(String, String)> {
        let known: HashSet<&str> = self.items.iter().map(|i| i.name.as_str()).collect();
        let mut unknown = Vec::new();

        for (z, row) in self.item_tracker.zone_items.iter().enumerate() {
            for (i, name) in row.iter().enumerate() {
                if !name.is_empty() && !known.contains(name.as_str()) {
                    unknown.push((format!("zone {}/{}", z + 1, i + 1), name.clone()));
                }
            }
        }
        for name in &self.item_tracker.medallion_order {
            if !known.contains(name.as_str()) {
                unknown.push(("medallion order".to_string(), name.clone()));
            }
        }
        for name in &self.item_tracker.starting_items {
            if !known.contains(name.as_str()) {
                unknown.push(("starting items".to_string(), name.clone()));
            }
        }
        unknown
    }

    /// Non-empty dungeon reward names, in table order
    pub fn reward_names(&self) -> Vec<&str> {
        self.item_tracker
            .dungeon_rewards
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
