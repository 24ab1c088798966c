pub mod action;
pub mod fuzzy;
pub mod input;
pub mod undo;
pub mod zone;

use tracing::{debug, info, warn};

use crate::io::state::{SavedState, StateError, StateStore};
use crate::model::config::{ConfigError, TrackerConfig};
use crate::model::hints::{ALWAYS_SLOTS, HintRegistry};
use crate::model::item::Item;

use action::Bindings;
use fuzzy::LocationMatcher;
use input::{InputState, KbInput};
use undo::{Ledger, LedgerEntry};
use zone::ZoneResolver;

/// The whole tracker: items, hints, undo history and the gesture decoder.
///
/// All mutation goes through here so that every recorded change lands in the
/// ledger exactly once.
#[derive(Debug, Clone)]
pub struct Tracker {
    config: TrackerConfig,
    bindings: Bindings,
    resolver: ZoneResolver,
    matcher: LocationMatcher,
    items: Vec<Item>,
    hints: HintRegistry,
    ledger: Ledger,
    input: KbInput,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        let bindings = Bindings::from_config(&config.binds)?;
        let resolver = ZoneResolver::new(&config.item_tracker);
        let matcher = LocationMatcher::new(&config.hint_tracker);
        let mut tracker = Tracker {
            config,
            bindings,
            resolver,
            matcher,
            items: Vec::new(),
            hints: HintRegistry::new(),
            ledger: Ledger::new(),
            input: KbInput::default(),
        };
        tracker.reset();
        Ok(tracker)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item_index(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name == name)
    }

    pub fn hints(&self) -> &HintRegistry {
        &self.hints
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn input_state(&self) -> &InputState {
        &self.input.state
    }

    pub fn downgrade_next(&self) -> bool {
        self.input.downgrade_next
    }

    pub fn text_buffer(&self) -> &str {
        &self.input.buffer
    }

    /// No gesture or text entry in progress
    pub fn is_idle(&self) -> bool {
        self.input.state == InputState::Idle
    }

    /// Typed characters currently go to the text buffer rather than bindings
    pub fn eats_text(&self) -> bool {
        matches!(self.input.state, InputState::TextInput { .. })
    }

    /// Name of the dungeon reward assigned to an item, if any
    pub fn reward_name(&self, item: &Item) -> Option<&str> {
        item.dungeon_index
            .checked_sub(1)
            .and_then(|i| self.config.reward_names().get(i).copied())
    }

    // -----------------------------------------------------------------------
    // Item commands
    // -----------------------------------------------------------------------

    /// Upgrade or downgrade an item, recording the change when there was one
    pub fn change_item(&mut self, index: usize, upgrade: bool) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            warn!(index, "no item at index");
            return false;
        };
        let changed = if upgrade {
            item.upgrade()
        } else {
            item.downgrade()
        };
        if changed {
            debug!(item = %item.name, upgrade, "item changed");
            self.ledger.push(LedgerEntry::Item { index, upgrade });
        }
        changed
    }

    pub fn click_left(&mut self, index: usize) -> bool {
        self.change_item(index, true)
    }

    pub fn click_right(&mut self, index: usize) -> bool {
        self.change_item(index, false)
    }

    /// Scroll over an item. Medallions cycle their dungeon reward, songs
    /// ignore the wheel, everything else upgrades (up) or downgrades.
    pub fn wheel(&mut self, index: usize, up: bool) {
        let reward_count = self.config.reward_names().len();
        let Some(item) = self.items.get_mut(index) else {
            warn!(index, "no item at index");
            return;
        };
        if item.is_medallion {
            item.cycle_dungeon(up, reward_count);
            return;
        }
        if item.is_song {
            debug!(item = %item.name, "wheel ignored for songs");
            return;
        }
        self.change_item(index, up);
    }

    pub fn undo(&mut self) {
        self.ledger.undo(&mut self.items, &mut self.hints);
    }

    pub fn redo(&mut self) {
        self.ledger
            .redo(&mut self.items, &mut self.hints, &self.config.hint_tracker.limits);
    }

    /// Reinitialize everything from configuration
    pub fn reset(&mut self) {
        self.items = self.config.items.clone();
        self.hints = HintRegistry::new();
        self.ledger.clear();
        self.input.reset();
        self.apply_starting_items();
    }

    fn apply_starting_items(&mut self) {
        for name in &self.config.item_tracker.starting_items {
            match self.items.iter_mut().find(|i| &i.name == name) {
                Some(item) => {
                    item.upgrade();
                }
                None => warn!(item = %name, "unknown starting item"),
            }
        }
    }

    /// Swap in a new configuration. Items, hints and history are kept; a
    /// changed catalog takes effect on the next reset.
    pub fn reload_config(&mut self, config: TrackerConfig) -> Result<(), ConfigError> {
        let bindings = Bindings::from_config(&config.binds)?;
        self.resolver = ZoneResolver::new(&config.item_tracker);
        self.matcher = LocationMatcher::new(&config.hint_tracker);
        self.bindings = bindings;
        self.config = config;
        self.input.reset();
        info!("configuration reloaded");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn snapshot(&self) -> SavedState {
        SavedState {
            items: self.items.clone(),
            hints: self.hints.clone(),
            undo_stack: self.ledger.undo_entries().to_vec(),
            redo_stack: self.ledger.redo_entries().to_vec(),
            saved_at: None,
        }
    }

    /// Replace the live state with a saved one. Nothing changes unless the
    /// saved state fits the current catalog.
    pub fn restore(&mut self, state: SavedState) -> Result<(), StateError> {
        self.check_compatible(&state)?;
        self.items = state.items;
        self.hints = state.hints;
        self.ledger = Ledger::from_parts(state.undo_stack, state.redo_stack);
        self.input.reset();
        Ok(())
    }

    fn check_compatible(&self, state: &SavedState) -> Result<(), StateError> {
        let catalog = &self.config.items;
        if state.items.len() != catalog.len() {
            return Err(StateError::Inconsistent(format!(
                "{} items saved, catalog has {}",
                state.items.len(),
                catalog.len()
            )));
        }
        if let Some((saved, known)) = state
            .items
            .iter()
            .zip(catalog)
            .find(|(s, c)| s.name != c.name)
        {
            return Err(StateError::Inconsistent(format!(
                "saved item {:?} where catalog has {:?}",
                saved.name, known.name
            )));
        }
        let reward_count = self.config.reward_names().len();
        for (saved, known) in state.items.iter().zip(catalog) {
            if saved.upgrade_index >= known.stage_count().max(1) {
                return Err(StateError::Inconsistent(format!(
                    "{:?} is at stage {} of {}",
                    saved.name,
                    saved.upgrade_index,
                    known.stage_count()
                )));
            }
            if saved.count > known.count_max {
                return Err(StateError::Inconsistent(format!(
                    "{:?} has count {} over its max {}",
                    saved.name, saved.count, known.count_max
                )));
            }
            if saved.dungeon_index > reward_count {
                return Err(StateError::Inconsistent(format!(
                    "{:?} refers to dungeon reward {}",
                    saved.name, saved.dungeon_index
                )));
            }
        }
        for entry in state.undo_stack.iter().chain(&state.redo_stack) {
            match entry {
                LedgerEntry::Item { index, .. } if *index >= catalog.len() => {
                    return Err(StateError::Inconsistent(format!(
                        "history refers to item {index}"
                    )));
                }
                LedgerEntry::Always { slot, .. } if *slot >= ALWAYS_SLOTS => {
                    return Err(StateError::Inconsistent(format!(
                        "history refers to always slot {slot}"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Write the current state
    pub fn save(&self, store: &StateStore) -> Result<(), StateError> {
        store.write(&self.snapshot())
    }

    /// Load saved state, keeping the current state on any failure
    pub fn load(&mut self, store: &StateStore) -> bool {
        let state = match store.read() {
            Ok(state) => state,
            Err(StateError::Missing(path)) => {
                info!(path = %path.display(), "no saved state");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "could not load saved state");
                return false;
            }
        };
        match self.restore(state) {
            Ok(()) => {
                info!(path = %store.path().display(), "state loaded");
                true
            }
            Err(e) => {
                warn!(error = %e, "saved state does not match the catalog");
                false
            }
        }
    }
}
