use std::collections::HashSet;

use tracing::{debug, info, warn};
use unicode_segmentation::UnicodeSegmentation;

use super::Tracker;
use super::action::Action;
use super::undo::LedgerEntry;
use super::zone::ZoneError;
use crate::model::hints::HintKind;

/// Where the keyboard gesture decoder currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    #[default]
    Idle,
    /// Waiting for the zone digit
    ZoneSelect,
    /// Zone chosen, waiting for the item digit
    ItemInput { zone: u8 },
    /// Capturing free text for a hint
    TextInput { kind: HintKind },
    /// Assigning rewards to medallions, `cursor` into the medallion order
    DungeonInput { cursor: usize },
}

impl InputState {
    pub fn label(&self) -> String {
        match self {
            InputState::Idle => "idle".to_string(),
            InputState::ZoneSelect => "zone?".to_string(),
            InputState::ItemInput { zone } => format!("zone {zone}, item?"),
            InputState::TextInput { kind } => format!("{}:", kind.label()),
            InputState::DungeonInput { cursor } => format!("dungeon #{}", cursor + 1),
        }
    }
}

/// Keyboard gesture state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KbInput {
    pub state: InputState,
    /// Sticky: the next keypad item gesture downgrades instead of upgrading
    pub downgrade_next: bool,
    pub buffer: String,
}

impl KbInput {
    pub fn reset(&mut self) {
        *self = KbInput::default();
    }
}

impl Tracker {
    /// Feed typed characters. While capturing hint text they go to the
    /// buffer verbatim; otherwise each is decoded through the bindings.
    pub fn input(&mut self, chars: &str) {
        for c in chars.chars() {
            if let InputState::TextInput { .. } = self.input.state {
                self.input.buffer.push(c);
                continue;
            }
            let action = self.bindings.action_for(c);
            self.input_action(action);
        }
    }

    /// Advance the gesture state machine by one decoded action
    pub fn input_action(&mut self, action: Action) {
        if action == Action::Ignore {
            return;
        }

        // StartItemInput is the unconditional abort for any gesture in progress.
        if action == Action::StartItemInput && self.input.state != InputState::Idle {
            debug!(state = ?self.input.state, "gesture aborted");
            self.input.reset();
            return;
        }

        match self.input.state {
            InputState::Idle => self.idle_action(action),
            InputState::ZoneSelect => match action {
                Action::DowngradeNext => self.input.downgrade_next = !self.input.downgrade_next,
                Action::Direction(dir) => {
                    self.input.state = InputState::ItemInput { zone: dir.zone() };
                }
                _ => {
                    debug!(action = action.name(), "unexpected key in zone select");
                    self.input.reset();
                }
            },
            InputState::ItemInput { zone } => {
                if action == Action::DowngradeNext {
                    self.input.downgrade_next = !self.input.downgrade_next;
                    return;
                }
                self.finish_item_gesture(zone, action.zone().unwrap_or(0));
            }
            // Text capture never decodes characters; only direct actions land here.
            InputState::TextInput { .. } => {}
            InputState::DungeonInput { cursor } => self.dungeon_action(cursor, action),
        }
    }

    fn idle_action(&mut self, action: Action) {
        match action {
            Action::StartItemInput => self.input.state = InputState::ZoneSelect,
            Action::DowngradeNext => {
                self.input.state = InputState::ZoneSelect;
                self.input.downgrade_next = !self.input.downgrade_next;
            }
            Action::Direction(dir) => {
                self.input.state = InputState::ItemInput { zone: dir.zone() };
            }
            Action::StartHintInput(kind) => {
                self.input.buffer.clear();
                self.input.state = InputState::TextInput { kind };
            }
            Action::StartDungeonInput => self.start_dungeon_input(),
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
            Action::Ignore => {}
        }
    }

    fn finish_item_gesture(&mut self, zone: u8, item: u8) {
        let upgrade = !self.input.downgrade_next;
        match self.resolver.resolve_item(zone, item, &self.items) {
            Ok(index) => {
                self.change_item(index, upgrade);
            }
            Err(e) => warn!(error = %e, "keypad gesture failed"),
        }
        self.input.reset();
    }

    // -----------------------------------------------------------------------
    // Text input
    // -----------------------------------------------------------------------

    /// Commit the text buffer to its hint category and return to idle
    pub fn submit(&mut self) {
        let InputState::TextInput { kind } = self.input.state else {
            return;
        };
        let text = std::mem::take(&mut self.input.buffer);
        self.input.reset();
        self.submit_hint(kind, &text);
    }

    /// Drop any gesture or text in progress
    pub fn cancel(&mut self) {
        self.input.reset();
    }

    /// Remove the last grapheme from the text buffer
    pub fn backspace(&mut self) {
        if !matches!(self.input.state, InputState::TextInput { .. }) {
            return;
        }
        let cut = self
            .input
            .buffer
            .grapheme_indices(true)
            .next_back()
            .map(|(i, _)| i);
        if let Some(i) = cut {
            self.input.buffer.truncate(i);
        }
    }

    fn submit_hint(&mut self, kind: HintKind, text: &str) {
        if text.trim().is_empty() {
            debug!(kind = kind.label(), "empty hint ignored");
            return;
        }

        if kind == HintKind::Always {
            let Some((slot, rest)) = self.matcher.parse_always(text) else {
                warn!(text, "no always location matches");
                return;
            };
            if self.hints.set_always(slot, &rest) {
                self.ledger.push(LedgerEntry::Always { slot, text: rest });
            }
            return;
        }

        let text = if kind.matches_location() {
            match self.matcher.match_location(text) {
                Some(location) => location.to_string(),
                None => {
                    debug!(text, "no location matches, keeping text as typed");
                    text.to_string()
                }
            }
        } else {
            text.to_string()
        };

        let limit = self.config.hint_tracker.limits.for_kind(kind);
        if self.hints.add(kind, &text, limit) {
            self.ledger.push(LedgerEntry::Hint { hint: kind, text });
        }
    }

    // -----------------------------------------------------------------------
    // Dungeon reward entry
    // -----------------------------------------------------------------------

    fn start_dungeon_input(&mut self) {
        if self.config.item_tracker.medallion_order.is_empty() {
            info!("no medallion order configured");
            return;
        }
        for item in self.items.iter_mut().filter(|i| i.is_medallion) {
            item.dungeon_index = 0;
        }
        for name in &self.config.item_tracker.medallion_order {
            if let Some(item) = self.items.iter_mut().find(|i| &i.name == name) {
                item.dungeon_index = 0;
            }
        }
        self.input.state = InputState::DungeonInput { cursor: 0 };
    }

    fn dungeon_action(&mut self, cursor: usize, action: Action) {
        let len = self.config.item_tracker.medallion_order.len();
        if len == 0 {
            self.input.reset();
            return;
        }
        match action {
            Action::Undo => {
                self.input.state = InputState::DungeonInput {
                    cursor: (cursor + len - 1) % len,
                };
            }
            Action::Redo => {
                self.input.state = InputState::DungeonInput {
                    cursor: (cursor + 1) % len,
                };
            }
            Action::Direction(dir) => {
                if let Err(e) = self.assign_reward(cursor, dir.zone()) {
                    warn!(error = %e, "dungeon entry aborted");
                    self.input.reset();
                    return;
                }
                if cursor + 1 >= len {
                    self.infer_remaining_rewards();
                    self.input.reset();
                } else {
                    self.input.state = InputState::DungeonInput { cursor: cursor + 1 };
                }
            }
            _ => {}
        }
    }

    fn assign_reward(&mut self, cursor: usize, zone: u8) -> Result<(), ZoneError> {
        let reward = self.resolver.resolve_reward(zone)?;
        let Some(reward_index) = self.reward_index(reward) else {
            return Err(ZoneError::RewardUndefined(zone));
        };
        let medallion = &self.config.item_tracker.medallion_order[cursor];
        let Some(item) = self.items.iter_mut().find(|i| &i.name == medallion) else {
            return Err(ZoneError::UnknownMedallion(medallion.clone()));
        };
        debug!(medallion = %item.name, reward, "reward assigned");
        item.dungeon_index = reward_index;
        Ok(())
    }

    /// 1-based position of `reward` in the non-empty reward names
    fn reward_index(&self, reward: &str) -> Option<usize> {
        self.config
            .reward_names()
            .iter()
            .position(|r| *r == reward)
            .map(|i| i + 1)
    }

    /// Pair still-unset medallions with still-unassigned rewards. Medallions
    /// go in medallion order, rewards in name order.
    fn infer_remaining_rewards(&mut self) {
        let rewards = self.config.reward_names();
        let order = &self.config.item_tracker.medallion_order;

        let medallions: Vec<usize> = order
            .iter()
            .filter_map(|name| self.items.iter().position(|i| &i.name == name))
            .collect();
        let assigned: HashSet<usize> = medallions
            .iter()
            .map(|&i| self.items[i].dungeon_index)
            .filter(|&d| d != 0)
            .collect();
        let unset: Vec<usize> = medallions
            .iter()
            .copied()
            .filter(|&i| self.items[i].dungeon_index == 0)
            .collect();

        let mut remaining: Vec<(usize, &str)> = rewards
            .iter()
            .enumerate()
            .map(|(i, r)| (i + 1, *r))
            .filter(|(i, _)| !assigned.contains(i))
            .collect();
        remaining.sort_by(|a, b| a.1.cmp(b.1));

        if unset.is_empty() {
            return;
        }
        if unset.len() != remaining.len() {
            info!(
                unset = unset.len(),
                rewards = remaining.len(),
                "cannot infer remaining rewards"
            );
            return;
        }
        for (item, (reward, name)) in unset.into_iter().zip(remaining) {
            debug!(medallion = %self.items[item].name, reward = name, "reward inferred");
            self.items[item].dungeon_index = reward;
        }
    }
}
