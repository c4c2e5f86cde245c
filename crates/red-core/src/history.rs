//! Undo/redo history — bounded snapshot stacks.
//!
//! Each checkpoint captures the full document plus the cursor, taken just
//! before a mutation. `Rope::clone` is a persistent O(1) copy, so a
//! snapshot stays valid no matter how the live buffer mutates afterwards —
//! the memory cost is shared structure, not a full text copy.
//!
//! History is linear: a new checkpoint clears the redo stack, so redo is
//! only valid immediately after undo with no intervening edit. Depth is
//! capped at [`UNDO_MAX`]; the oldest entry is evicted first.

use ropey::Rope;

use crate::position::Position;

/// Maximum number of undo entries retained.
pub const UNDO_MAX: usize = 50;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A point-in-time copy of buffer state: document text and cursor.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// The document at capture time.
    pub rope: Rope,
    /// The cursor at capture time.
    pub cursor: Position,
}

impl Snapshot {
    /// Capture a snapshot.
    #[must_use]
    pub const fn new(rope: Rope, cursor: Position) -> Self {
        Self { rope, cursor }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Undo/redo history for a buffer.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Record state just before a mutation.
    ///
    /// Evicts the oldest entry once [`UNDO_MAX`] is exceeded and clears the
    /// redo stack — any forward history is discarded by a new edit.
    pub fn checkpoint(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > UNDO_MAX {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Pop the most recent undo entry, pushing `current` onto the redo
    /// stack. Returns `None` (leaving `current` unrecorded) when there is
    /// nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(snapshot)
    }

    /// Pop the most recent redo entry, pushing `current` onto the undo
    /// stack. Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(snapshot)
    }

    /// Drop all history. Called on a fresh load.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// True if there are entries that can be undone.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// True if there are entries that can be redone.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of entries on the undo stack.
    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of entries on the redo stack.
    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
