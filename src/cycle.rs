//! Cycling through a bucket on repeated presses of the same key.

use crate::geometry::Division;
use crate::hotkey::KeyId;

/// Remembers the last key pressed and how far into its bucket we are.
///
/// Pressing the same key again advances (wrapping around); pressing any
/// other key starts from the first division of that key's bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSelector {
    last_key: Option<KeyId>,
    repeat_index: usize,
}

impl CycleSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The key that produced the most recent selection.
    pub fn last_key(&self) -> Option<KeyId> {
        self.last_key
    }

    /// Index into the bucket of the most recent selection.
    pub fn repeat_index(&self) -> usize {
        self.repeat_index
    }

    /// Pick the next division from `bucket` for a press of `key`.
    ///
    /// An empty bucket leaves the state untouched and returns `None`.
    pub fn select(&mut self, key: KeyId, bucket: &[Division]) -> Option<Division> {
        if bucket.is_empty() {
            return None;
        }
        self.repeat_index = if self.last_key == Some(key) {
            (self.repeat_index + 1) % bucket.len()
        } else {
            0
        };
        self.last_key = Some(key);
        bucket.get(self.repeat_index).copied()
    }
}
