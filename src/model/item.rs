use serde::{Deserialize, Serialize};

/// How an item advances when upgraded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionKind {
    /// Plain on/off toggle
    Toggle,
    /// Discrete upgrade stages (`upgrade_index` into the progression)
    Staged,
    /// Bounded numeric count
    Countable,
}

/// One trackable item.
///
/// The enabled flag gates everything else: a disabled item keeps its stage
/// and count but renders as the neutral/disabled stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique name, used by the zone grid and the medallion ordering
    pub name: String,
    /// Capacity at each stage (quiver size, bag size, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capacity_progression: Vec<u32>,
    /// Named upgrade stages (Hookshot, Longshot, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item_progression: Vec<String>,
    /// Current stage, meaningful only while enabled
    #[serde(default)]
    pub upgrade_index: usize,
    /// Assigned dungeon reward, 1-based into the reward names; 0 = unset
    #[serde(default)]
    pub dungeon_index: usize,
    /// Upper bound for countable items; 0 means the item is not countable
    #[serde(default)]
    pub count_max: u32,
    #[serde(default)]
    pub count_step: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub is_medallion: bool,
    #[serde(default)]
    pub is_song: bool,
    #[serde(default)]
    pub enabled: bool,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Item {
            name: name.into(),
            capacity_progression: Vec::new(),
            item_progression: Vec::new(),
            upgrade_index: 0,
            dungeon_index: 0,
            count_max: 0,
            count_step: 0,
            count: 0,
            is_medallion: false,
            is_song: false,
            enabled: false,
        }
    }

    pub fn kind(&self) -> ProgressionKind {
        if self.count_max > 0 {
            ProgressionKind::Countable
        } else if self.stage_count() > 0 {
            ProgressionKind::Staged
        } else {
            ProgressionKind::Toggle
        }
    }

    /// Number of upgrade stages. Named stages win when both progressions are
    /// set; config validation guarantees they have the same length anyway.
    pub fn stage_count(&self) -> usize {
        if !self.item_progression.is_empty() {
            self.item_progression.len()
        } else {
            self.capacity_progression.len()
        }
    }

    fn step(&self) -> u32 {
        self.count_step.max(1)
    }

    /// Upgrade the item. A disabled item is only enabled.
    /// Returns whether anything changed.
    pub fn upgrade(&mut self) -> bool {
        if !self.enabled {
            self.enabled = true;
            return true;
        }

        match self.kind() {
            ProgressionKind::Countable => {
                // Reported as a change even when already clamped at max.
                self.count = self.count.saturating_add(self.step()).min(self.count_max);
                true
            }
            ProgressionKind::Staged => {
                if self.upgrade_index + 1 >= self.stage_count() {
                    return false;
                }
                self.upgrade_index += 1;
                true
            }
            ProgressionKind::Toggle => false,
        }
    }

    /// Downgrade the item. At the lowest stage (or a count of zero) the item
    /// is disabled instead; a disabled item is left alone.
    pub fn downgrade(&mut self) -> bool {
        if !self.enabled {
            return false;
        }

        match self.kind() {
            ProgressionKind::Countable => {
                if self.count == 0 {
                    self.enabled = false;
                } else {
                    self.count = self.count.saturating_sub(self.step());
                }
            }
            ProgressionKind::Staged => {
                if self.upgrade_index == 0 {
                    self.enabled = false;
                } else {
                    self.upgrade_index -= 1;
                }
            }
            ProgressionKind::Toggle => self.enabled = false,
        }
        true
    }

    /// Stage to render: the current stage when enabled, `None` for the
    /// neutral/disabled placeholder.
    pub fn effective_stage(&self) -> Option<usize> {
        self.enabled.then_some(self.upgrade_index)
    }

    /// Capacity at the current stage, if the item has one
    pub fn capacity(&self) -> Option<u32> {
        self.capacity_progression.get(self.upgrade_index).copied()
    }

    /// Display name of the current stage, falling back to the item name
    pub fn stage_name(&self) -> &str {
        match self.effective_stage() {
            Some(idx) => self
                .item_progression
                .get(idx)
                .map(String::as_str)
                .unwrap_or(&self.name),
            None => self
                .item_progression
                .first()
                .map(String::as_str)
                .unwrap_or(&self.name),
        }
    }

    /// Cycle the dungeon reward assignment through `0..=reward_count`
    pub fn cycle_dungeon(&mut self, forward: bool, reward_count: usize) {
        if reward_count == 0 {
            return;
        }
        let len = reward_count + 1;
        self.dungeon_index = if forward {
            (self.dungeon_index + 1) % len
        } else {
            (self.dungeon_index + len - 1) % len
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(stages: &[&str]) -> Item {
        let mut item = Item::new("Progressive Hookshot");
        item.item_progression = stages.iter().map(|s| s.to_string()).collect();
        item
    }

    fn countable(max: u32, step: u32) -> Item {
        let mut item = Item::new("Gold Skulltula Token");
        item.count_max = max;
        item.count_step = step;
        item
    }

    #[test]
    fn first_upgrade_only_enables() {
        let mut item = staged(&["Hookshot", "Longshot"]);
        assert!(item.upgrade());
        assert!(item.enabled);
        assert_eq!(item.upgrade_index, 0);
    }

    #[test]
    fn enable_disable_keeps_stage() {
        for mut item in [
            staged(&["a", "b", "c"]),
            Item::new("Lens of Truth"),
            countable(100, 1),
        ] {
            let before = item.clone();
            assert!(item.upgrade());
            assert!(item.downgrade());
            assert_eq!(item, before);
        }
    }

    #[test]
    fn upgrade_at_last_stage_is_idempotent() {
        let mut item = staged(&["a", "b"]);
        item.upgrade();
        assert!(item.upgrade());
        assert_eq!(item.upgrade_index, 1);
        for _ in 0..5 {
            assert!(!item.upgrade());
        }
        assert_eq!(item.upgrade_index, 1);
    }

    #[test]
    fn downgrade_at_stage_zero_disables() {
        let mut item = staged(&["a", "b"]);
        item.upgrade();
        assert!(item.downgrade());
        assert!(!item.enabled);
        assert!(!item.downgrade());
    }

    #[test]
    fn toggle_item_upgrade_when_enabled_is_noop() {
        let mut item = Item::new("Lens of Truth");
        assert!(item.upgrade());
        assert!(!item.upgrade());
        assert!(item.enabled);
    }

    #[test]
    fn countable_stays_in_bounds() {
        for step in [1, 3, 7, 100] {
            let mut item = countable(50, step);
            let ops = [true, true, false, true, true, true, false, false, true, true];
            for _ in 0..20 {
                for &up in &ops {
                    if up {
                        item.upgrade();
                    } else {
                        item.downgrade();
                    }
                    assert!(item.count <= item.count_max, "step {step}");
                }
            }
        }
    }

    #[test]
    fn countable_upgrade_reports_change_when_clamped() {
        let mut item = countable(10, 4);
        item.upgrade();
        item.upgrade();
        item.upgrade();
        assert_eq!(item.count, 8);
        assert!(item.upgrade());
        assert_eq!(item.count, 10);
        assert!(item.upgrade());
        assert_eq!(item.count, 10);
    }

    #[test]
    fn countable_disables_only_once_floor_reached() {
        let mut item = countable(10, 1);
        item.upgrade();
        item.upgrade();
        assert_eq!(item.count, 1);
        assert!(item.downgrade());
        assert_eq!(item.count, 0);
        assert!(item.enabled);
        assert!(item.downgrade());
        assert!(!item.enabled);
    }

    #[test]
    fn effective_stage_follows_enabled() {
        let mut item = staged(&["Hookshot", "Longshot"]);
        assert_eq!(item.effective_stage(), None);
        assert_eq!(item.stage_name(), "Hookshot");
        item.upgrade();
        item.upgrade();
        assert_eq!(item.effective_stage(), Some(1));
        assert_eq!(item.stage_name(), "Longshot");
        item.enabled = false;
        assert_eq!(item.effective_stage(), None);
    }

    #[test]
    fn capacity_tracks_stage() {
        let mut item = Item::new("Bomb Bag");
        item.capacity_progression = vec![20, 30, 40];
        item.upgrade();
        assert_eq!(item.capacity(), Some(20));
        item.upgrade();
        item.upgrade();
        assert_eq!(item.capacity(), Some(40));
        assert_eq!(Item::new("Bow").capacity(), None);
    }

    #[test]
    fn cycle_dungeon_wraps_both_ways() {
        let mut item = Item::new("Forest Medallion");
        item.is_medallion = true;
        item.cycle_dungeon(false, 3);
        assert_eq!(item.dungeon_index, 3);
        item.cycle_dungeon(true, 3);
        assert_eq!(item.dungeon_index, 0);
        item.cycle_dungeon(true, 3);
        assert_eq!(item.dungeon_index, 1);
        item.cycle_dungeon(true, 0);
        assert_eq!(item.dungeon_index, 1);
    }
}
