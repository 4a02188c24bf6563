//! Linear undo/redo history of whole-document snapshots.
//!
//! Entries form one indexable sequence with a cursor. Slots before the cursor
//! hold states to undo back to; slots from the cursor on hold states to redo
//! forward to. Undo and redo swap the live state with the slot they step over,
//! so every entry is a complete, independently restorable value.

/// Default maximum number of history entries.
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Snapshot history with a cursor.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    limit: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl<T> History<T> {
    /// Create an empty history holding at most `limit` entries (minimum 1).
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record the state as it was before a mutation.
    ///
    /// Discards every redo entry, then drops the oldest entry once the limit
    /// is exceeded.
    pub fn checkpoint(&mut self, before: T) {
        self.entries.truncate(self.cursor);
        self.entries.push(before);
        self.cursor = self.entries.len();

        if self.entries.len() > self.limit {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back. `current` is the live state, kept for a later redo.
    /// Returns the state to restore, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(std::mem::replace(&mut self.entries[self.cursor], current))
    }

    /// Step forward. `current` is the live state, kept for a later undo.
    /// Returns the state to restore, or `None` if there is nothing to redo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        let restored = std::mem::replace(&mut self.entries[self.cursor], current);
        self.cursor += 1;
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Number of steps that can currently be undone.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of steps that can currently be redone.
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Total number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let mut history: History<u32> = History::default();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(0), None);
        assert_eq!(history.redo(0), None);
        assert_eq!(history.limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = History::new(10);
        // 0 -> 1 -> 2
        history.checkpoint(0);
        history.checkpoint(1);
        let live = 2;

        let live = history.undo(live).unwrap();
        assert_eq!(live, 1);
        let live = history.undo(live).unwrap();
        assert_eq!(live, 0);
        assert!(!history.can_undo());
        assert_eq!(history.redo_depth(), 2);

        let live = history.redo(live).unwrap();
        assert_eq!(live, 1);
        let live = history.redo(live).unwrap();
        assert_eq!(live, 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_checkpoint_discards_redo_branch() {
        let mut history = History::new(10);
        history.checkpoint(0);
        history.checkpoint(1);
        let live = history.undo(2).unwrap();
        assert!(history.can_redo());

        history.checkpoint(live);
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo_depth(), 2);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(3);
        for state in 0..5 {
            history.checkpoint(state);
        }
        assert_eq!(history.len(), 3);

        let mut live = 5;
        let mut steps = 0;
        while let Some(previous) = history.undo(live) {
            live = previous;
            steps += 1;
        }
        assert_eq!(steps, 3);
        // States 0 and 1 fell off the front.
        assert_eq!(live, 2);
    }

    #[test]
    fn test_limit_is_at_least_one() {
        let mut history = History::new(0);
        history.checkpoint(1);
        history.checkpoint(2);
        assert_eq!(history.len(), 1);
        assert_eq!(history.undo(3), Some(2));
    }

    #[test]
    fn test_clear() {
        let mut history = History::new(5);
        history.checkpoint(1);
        history.clear();
        assert!(history.is_empty());
        assert!(!history.can_undo());
    }
}
