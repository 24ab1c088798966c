use std::collections::HashMap;

use indexmap::IndexMap;

use crate::model::config::ConfigError;
use crate::model::hints::HintKind;

/// One of the nine keypad positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TopLeft,
    Top,
    TopRight,
    Left,
    Middle,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::TopLeft,
        Direction::Top,
        Direction::TopRight,
        Direction::Left,
        Direction::Middle,
        Direction::Right,
        Direction::BottomLeft,
        Direction::Bottom,
        Direction::BottomRight,
    ];

    /// Keypad digit for this position (7 = top left, 5 = middle, 3 = bottom right)
    pub fn zone(self) -> u8 {
        match self {
            Direction::TopLeft => 7,
            Direction::Top => 8,
            Direction::TopRight => 9,
            Direction::Left => 4,
            Direction::Middle => 5,
            Direction::Right => 6,
            Direction::BottomLeft => 1,
            Direction::Bottom => 2,
            Direction::BottomRight => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::TopLeft => "TopLeft",
            Direction::Top => "Top",
            Direction::TopRight => "TopRight",
            Direction::Left => "Left",
            Direction::Middle => "Middle",
            Direction::Right => "Right",
            Direction::BottomLeft => "BottomLeft",
            Direction::Bottom => "Bottom",
            Direction::BottomRight => "BottomRight",
        }
    }
}

/// A decoded key press, before the input state machine interprets it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Ignore,
    StartItemInput,
    DowngradeNext,
    Undo,
    Redo,
    StartDungeonInput,
    StartHintInput(HintKind),
    Direction(Direction),
}

impl Action {
    /// Every bindable action, for help output and `rtk bind` validation
    pub fn all() -> Vec<Action> {
        let mut all = vec![
            Action::StartItemInput,
            Action::DowngradeNext,
            Action::Undo,
            Action::Redo,
            Action::StartDungeonInput,
        ];
        all.extend(HintKind::ALL.into_iter().map(Action::StartHintInput));
        all.extend(Direction::ALL.into_iter().map(Action::Direction));
        all
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Ignore => "Ignore",
            Action::StartItemInput => "StartItemInput",
            Action::DowngradeNext => "DowngradeNext",
            Action::Undo => "Undo",
            Action::Redo => "Redo",
            Action::StartDungeonInput => "StartDungeonInput",
            Action::StartHintInput(kind) => match kind {
                HintKind::Woth => "StartWothInput",
                HintKind::Goal => "StartGoalInput",
                HintKind::Barren => "StartBarrenInput",
                HintKind::Sometimes => "StartSometimesInput",
                HintKind::Always => "StartAlwaysInput",
            },
            Action::Direction(dir) => dir.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        if name == "Ignore" {
            return Some(Action::Ignore);
        }
        Action::all().into_iter().find(|a| a.name() == name)
    }

    /// Keypad zone for directional actions
    pub fn zone(self) -> Option<u8> {
        match self {
            Action::Direction(dir) => Some(dir.zone()),
            _ => None,
        }
    }
}

/// Character → action table built from `[binds]`
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    map: HashMap<char, Action>,
}

impl Bindings {
    pub fn from_config(binds: &IndexMap<String, String>) -> Result<Self, ConfigError> {
        let mut map = HashMap::with_capacity(binds.len());
        for (key, name) in binds {
            let mut chars = key.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(ConfigError::BadBindKey(key.clone())),
            };
            let action = Action::from_name(name).ok_or_else(|| ConfigError::UnknownAction {
                key: key.clone(),
                action: name.clone(),
            })?;
            map.insert(c, action);
        }
        Ok(Bindings { map })
    }

    /// Unbound characters decode to [`Action::Ignore`]
    pub fn action_for(&self, c: char) -> Action {
        self.map.get(&c).copied().unwrap_or(Action::Ignore)
    }

    /// First key bound to `action`, lowest character first
    pub fn key_for(&self, action: Action) -> Option<char> {
        self.map
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(c, _)| *c)
            .min()
    }
}
