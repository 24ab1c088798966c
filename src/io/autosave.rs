use std::time::{Duration, Instant};

use crate::model::config::SaveConfig;

/// Coalesces bursts of changes into single writes.
///
/// A write is due once the state is dirty and either no change has arrived
/// for `debounce`, or the last write is older than `max_age`.
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    debounce: Duration,
    max_age: Duration,
    last_change: Option<Instant>,
    last_save: Instant,
}

impl SaveDebouncer {
    pub fn new(debounce: Duration, max_age: Duration, now: Instant) -> Self {
        SaveDebouncer {
            debounce,
            max_age,
            last_change: None,
            last_save: now,
        }
    }

    pub fn from_config(save: &SaveConfig, now: Instant) -> Self {
        Self::new(
            Duration::from_millis(save.debounce_ms),
            Duration::from_secs(save.max_age_secs),
            now,
        )
    }

    pub fn mark_dirty(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    pub fn is_dirty(&self) -> bool {
        self.last_change.is_some()
    }

    pub fn should_save(&self, now: Instant) -> bool {
        let Some(changed) = self.last_change else {
            return false;
        };
        now.saturating_duration_since(changed) >= self.debounce
            || now.saturating_duration_since(self.last_save) >= self.max_age
    }

    pub fn saved(&mut self, now: Instant) {
        self.last_change = None;
        self.last_save = now;
    }
}
