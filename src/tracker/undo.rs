use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::config::HintLimits;
use crate::model::hints::{HintKind, HintRegistry};
use crate::model::item::Item;

/// A single reversible action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEntry {
    /// Item upgraded (`upgrade == true`) or downgraded
    Item { index: usize, upgrade: bool },
    /// Text appended to a list hint category
    Hint { hint: HintKind, text: String },
    /// Text stored in an always slot
    Always { slot: usize, text: String },
}

/// Linear undo/redo history. Recording a new action drops the redo side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    undo: Vec<LedgerEntry>,
    redo: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Rebuild from persisted stacks (oldest first)
    pub fn from_parts(undo: Vec<LedgerEntry>, redo: Vec<LedgerEntry>) -> Self {
        Ledger { undo, redo }
    }

    /// Record an action that already happened. Clears the redo stack.
    pub fn push(&mut self, entry: LedgerEntry) {
        self.undo.push(entry);
        self.redo.clear();
    }

    /// Undo the last action by applying its inverse.
    /// Returns the entry that was undone. An entry whose inverse no longer
    /// applies is dropped rather than moved to the redo side.
    pub fn undo(&mut self, items: &mut [Item], hints: &mut HintRegistry) -> Option<LedgerEntry> {
        let Some(entry) = self.undo.pop() else {
            warn!("no action to undo");
            return None;
        };
        if !apply_inverse(&entry, items, hints) {
            warn!(entry = ?entry, "undo did not apply, entry dropped");
            return None;
        }
        self.redo.push(entry.clone());
        Some(entry)
    }

    /// Redo the last undone action by applying it again. An entry that can
    /// no longer be applied (e.g. a hint list now at its cap) is dropped.
    pub fn redo(
        &mut self,
        items: &mut [Item],
        hints: &mut HintRegistry,
        limits: &HintLimits,
    ) -> Option<LedgerEntry> {
        let Some(entry) = self.redo.pop() else {
            warn!("no action to redo");
            return None;
        };
        if !apply_forward(&entry, items, hints, limits) {
            warn!(entry = ?entry, "redo did not apply, entry dropped");
            return None;
        }
        self.undo.push(entry.clone());
        Some(entry)
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn undo_entries(&self) -> &[LedgerEntry] {
        &self.undo
    }

    pub fn redo_entries(&self) -> &[LedgerEntry] {
        &self.redo
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

fn item_mut(items: &mut [Item], index: usize) -> Option<&mut Item> {
    let item = items.get_mut(index);
    if item.is_none() {
        warn!(index, "ledger entry refers to a missing item");
    }
    item
}

/// Apply the inverse of an entry (for undo). Returns whether it applied.
fn apply_inverse(entry: &LedgerEntry, items: &mut [Item], hints: &mut HintRegistry) -> bool {
    match entry {
        LedgerEntry::Item { index, upgrade } => match item_mut(items, *index) {
            Some(item) if *upgrade => item.downgrade(),
            Some(item) => item.upgrade(),
            None => false,
        },
        LedgerEntry::Hint { hint, text } => hints.remove_last(*hint, text),
        LedgerEntry::Always { slot, .. } => hints.clear_always(*slot),
    }
}

/// Apply an entry again (for redo). Returns whether it applied.
fn apply_forward(
    entry: &LedgerEntry,
    items: &mut [Item],
    hints: &mut HintRegistry,
    limits: &HintLimits,
) -> bool {
    match entry {
        LedgerEntry::Item { index, upgrade } => match item_mut(items, *index) {
            Some(item) if *upgrade => item.upgrade(),
            Some(item) => item.downgrade(),
            None => false,
        },
        LedgerEntry::Hint { hint, text } => hints.add(*hint, text, limits.for_kind(*hint)),
        LedgerEntry::Always { slot, text } => hints.set_always(*slot, text),
    }
}
