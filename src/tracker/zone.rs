use crate::model::config::{ItemTrackerConfig, ZONE_COUNT};
use crate::model::item::Item;

/// Why a keypad address did not resolve
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneError {
    #[error("invalid zone/item keys ({zone}/{item}), must be [1-9]")]
    OutOfRange { zone: u8, item: u8 },
    #[error("no item defined at {zone}/{item}")]
    Undefined { zone: u8, item: u8 },
    #[error("bad item name {name:?} at {zone}/{item}")]
    Misconfigured { zone: u8, item: u8, name: String },
    #[error("invalid reward zone {0}, must be [1-9]")]
    RewardOutOfRange(u8),
    #[error("no dungeon reward defined at zone {0}")]
    RewardUndefined(u8),
    #[error("medallion {0:?} is not in the item catalog")]
    UnknownMedallion(String),
}

/// Maps keypad gestures to item indices and dungeon reward names
#[derive(Debug, Clone, Default)]
pub struct ZoneResolver {
    grid: [[String; ZONE_COUNT]; ZONE_COUNT],
    rewards: [String; ZONE_COUNT],
}

fn in_range(key: u8) -> bool {
    (1..=ZONE_COUNT as u8).contains(&key)
}

impl ZoneResolver {
    /// Build from config, padding missing rows and cells with ""
    pub fn new(config: &ItemTrackerConfig) -> Self {
        let grid = std::array::from_fn(|z| {
            std::array::from_fn(|i| {
                config
                    .zone_items
                    .get(z)
                    .and_then(|row| row.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
        });
        let rewards =
            std::array::from_fn(|z| config.dungeon_rewards.get(z).cloned().unwrap_or_default());
        ZoneResolver { grid, rewards }
    }

    /// Item name at a 1-based (zone, item) address
    pub fn item_name(&self, zone: u8, item: u8) -> Result<&str, ZoneError> {
        if !in_range(zone) || !in_range(item) {
            return Err(ZoneError::OutOfRange { zone, item });
        }
        let name = &self.grid[zone as usize - 1][item as usize - 1];
        if name.is_empty() {
            return Err(ZoneError::Undefined { zone, item });
        }
        Ok(name)
    }

    /// Index into `items` of the item at a 1-based (zone, item) address
    pub fn resolve_item(&self, zone: u8, item: u8, items: &[Item]) -> Result<usize, ZoneError> {
        let name = self.item_name(zone, item)?;
        items
            .iter()
            .position(|i| i.name == name)
            .ok_or_else(|| ZoneError::Misconfigured {
                zone,
                item,
                name: name.to_string(),
            })
    }

    /// Dungeon reward name for a 1-based zone
    pub fn resolve_reward(&self, zone: u8) -> Result<&str, ZoneError> {
        if !in_range(zone) {
            return Err(ZoneError::RewardOutOfRange(zone));
        }
        let name = &self.rewards[zone as usize - 1];
        if name.is_empty() {
            return Err(ZoneError::RewardUndefined(zone));
        }
        Ok(name)
    }
}
