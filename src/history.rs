//! Snapshot-based undo/redo.
//!
//! Each committed state is stored as the serialized JSON of the persistent
//! scene (boxes, arrows and selection). Comparing serialized strings lets
//! undo tell whether the live scene has drifted from the last commit.

use crate::constants::MAX_HISTORY_STATES;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct History {
    undos: Vec<String>,
    redos: Vec<String>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY_STATES)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undos: Vec::new(),
            redos: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a committed state. Identical consecutive commits are
    /// collapsed and leave the redo stack alone; any other commit clears it.
    /// Returns whether a new entry was pushed.
    pub fn commit(&mut self, state: String) -> bool {
        if self.undos.last() == Some(&state) {
            return false;
        }
        self.undos.push(state);
        self.redos.clear();
        if self.undos.len() > self.limit {
            let excess = self.undos.len() - self.limit;
            self.undos.drain(..excess);
        }
        debug!(depth = self.undos.len(), "history commit");
        true
    }

    /// Step back. If `current` differs from the last commit, the uncommitted
    /// changes are discarded (and kept for redo) by restoring that commit.
    /// Otherwise the last commit moves to the redo stack and the one before
    /// it is restored. Returns the state to restore, if any.
    pub fn undo(&mut self, current: String) -> Option<&str> {
        let top = self.undos.last()?;
        if *top == current {
            if self.undos.len() < 2 {
                return None;
            }
            let popped = self.undos.pop()?;
            self.redos.push(popped);
        } else {
            self.redos.push(current);
        }
        self.undos.last().map(String::as_str)
    }

    /// Step forward by re-applying the most recently undone state.
    pub fn redo(&mut self) -> Option<&str> {
        let next = self.redos.pop()?;
        self.undos.push(next);
        self.undos.last().map(String::as_str)
    }

    pub fn can_undo(&self) -> bool {
        self.undos.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redos.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undos.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redos.len()
    }

    pub fn clear(&mut self) {
        self.undos.clear();
        self.redos.clear();
    }
}
