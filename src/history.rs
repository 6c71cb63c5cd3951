//! Undo/redo history of inventory snapshots.
//!
//! Every committed gesture or action pushes the resulting state. The first
//! entry is the baseline loaded at startup, so undoing all the way returns
//! to it. Pushing after an undo discards the redo tail.

use crate::constants::MAX_HISTORY_STATES;
use crate::grid::InventorySnapshot;

#[derive(Debug, Clone)]
pub struct History {
    states: Vec<InventorySnapshot>,
    index: usize,
    max_states: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_STATES)
    }

    pub fn with_capacity(max_states: usize) -> Self {
        Self {
            states: Vec::new(),
            index: 0,
            max_states: max_states.max(1),
        }
    }

    /// Record a state. Returns false when it equals the current state.
    pub fn push(&mut self, state: InventorySnapshot) -> bool {
        if self.current() == Some(&state) {
            return false;
        }
        if !self.states.is_empty() {
            self.states.truncate(self.index + 1);
        }
        self.states.push(state);
        if self.states.len() > self.max_states {
            let excess = self.states.len() - self.max_states;
            self.states.drain(..excess);
        }
        self.index = self.states.len() - 1;
        true
    }

    pub fn current(&self) -> Option<&InventorySnapshot> {
        self.states.get(self.index)
    }

    pub fn undo(&mut self) -> Option<&InventorySnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.states.get(self.index)
    }

    pub fn redo(&mut self) -> Option<&InventorySnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.states.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.states.len()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Forget everything and start over from `baseline`.
    pub fn reset(&mut self, baseline: InventorySnapshot) {
        self.states.clear();
        self.states.push(baseline);
        self.index = 0;
    }
}
