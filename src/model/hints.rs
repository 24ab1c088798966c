use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Number of slot-addressed "always" hints
pub const ALWAYS_SLOTS: usize = 8;

/// Hint category targeted by a text entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintKind {
    /// Way of the hero
    Woth,
    Goal,
    Barren,
    Sometimes,
    Always,
}

impl HintKind {
    pub const ALL: [HintKind; 5] = [
        HintKind::Woth,
        HintKind::Goal,
        HintKind::Barren,
        HintKind::Sometimes,
        HintKind::Always,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HintKind::Woth => "woth",
            HintKind::Goal => "goal",
            HintKind::Barren => "barren",
            HintKind::Sometimes => "sometimes",
            HintKind::Always => "always",
        }
    }

    pub fn from_label(s: &str) -> Option<HintKind> {
        HintKind::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s))
    }

    /// Whether submitted text is replaced by the best matching location name
    pub fn matches_location(self) -> bool {
        matches!(self, HintKind::Woth | HintKind::Barren)
    }
}

/// A way-of-the-hero entry. Entering the same location twice marks it doubled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WothHint {
    pub location: String,
    #[serde(default)]
    pub doubled: bool,
}

/// All hint text entered during a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRegistry {
    #[serde(default)]
    pub woths: Vec<WothHint>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub barrens: Vec<String>,
    #[serde(default)]
    pub sometimes: Vec<String>,
    #[serde(default)]
    pub always: [String; ALWAYS_SLOTS],
}

impl HintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` to a list category. `limit` caps the list length when set.
    /// Returns false when nothing was recorded.
    pub fn add(&mut self, kind: HintKind, text: &str, limit: Option<usize>) -> bool {
        if kind == HintKind::Woth {
            return self.add_woth(text, limit);
        }

        let list = match self.list_mut(kind) {
            Some(list) => list,
            None => {
                warn!(kind = kind.label(), "hint category is slot-addressed, not a list");
                return false;
            }
        };
        if limit.is_some_and(|max| list.len() >= max) {
            warn!(kind = kind.label(), "hint list is full");
            return false;
        }
        list.push(text.to_string());
        true
    }

    fn add_woth(&mut self, text: &str, limit: Option<usize>) -> bool {
        if let Some(existing) = self.woths.iter_mut().find(|w| w.location == text) {
            if existing.doubled {
                info!(location = text, "woth already doubled");
                return false;
            }
            existing.doubled = true;
            return true;
        }

        if limit.is_some_and(|max| self.woths.len() >= max) {
            warn!(kind = "woth", "hint list is full");
            return false;
        }
        self.woths.push(WothHint {
            location: text.to_string(),
            doubled: false,
        });
        true
    }

    /// Reverse the most recent `add(kind, text)`. Returns false, changing
    /// nothing, when `text` is not in the category.
    ///
    /// A doubled woth is demoted to single before anything is removed.
    pub fn remove_last(&mut self, kind: HintKind, text: &str) -> bool {
        if kind == HintKind::Woth {
            let Some(pos) = self.woths.iter().rposition(|w| w.location == text) else {
                warn!(kind = "woth", text, "no such hint to remove");
                return false;
            };
            if self.woths[pos].doubled {
                self.woths[pos].doubled = false;
            } else {
                self.woths.remove(pos);
            }
            return true;
        }

        let Some(list) = self.list_mut(kind) else {
            return false;
        };
        match list.iter().rposition(|s| s == text) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => {
                warn!(kind = kind.label(), text, "no such hint to remove");
                false
            }
        }
    }

    /// Store `text` in an always slot, overwriting what was there
    pub fn set_always(&mut self, slot: usize, text: &str) -> bool {
        match self.always.get_mut(slot) {
            Some(entry) => {
                *entry = text.to_string();
                true
            }
            None => {
                warn!(slot, "always slot out of range");
                false
            }
        }
    }

    pub fn clear_always(&mut self, slot: usize) -> bool {
        self.set_always(slot, "")
    }

    fn list_mut(&mut self, kind: HintKind) -> Option<&mut Vec<String>> {
        match kind {
            HintKind::Goal => Some(&mut self.goals),
            HintKind::Barren => Some(&mut self.barrens),
            HintKind::Sometimes => Some(&mut self.sometimes),
            HintKind::Woth | HintKind::Always => None,
        }
    }

    /// Display lines for a category, in entry order
    pub fn lines(&self, kind: HintKind) -> Vec<String> {
        match kind {
            HintKind::Woth => self
                .woths
                .iter()
                .map(|w| {
                    if w.doubled {
                        format!("{} (x2)", w.location)
                    } else {
                        w.location.clone()
                    }
                })
                .collect(),
            HintKind::Goal => self.goals.clone(),
            HintKind::Barren => self.barrens.clone(),
            HintKind::Sometimes => self.sometimes.clone(),
            HintKind::Always => self.always.to_vec(),
        }
    }
}
