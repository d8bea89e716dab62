use std::collections::HashSet;

/// Progress-store seam injected into the session layer. A persistent
/// backend (browser storage, a save file) plugs in here; the storage
/// format is outside this crate's scope.
pub trait ProgressStore {
    fn mark_level_complete(&mut self, level: usize);
    fn is_level_complete(&self, level: usize) -> bool;

    /// Level 0 is always unlocked; every other level unlocks once the
    /// previous one is complete.
    fn is_level_unlocked(&self, level: usize) -> bool {
        level == 0 || self.is_level_complete(level - 1)
    }

    fn completed_count(&self) -> usize;
    fn reset(&mut self);
}

/// In-memory progress store.
#[derive(Debug, Default, Clone)]
pub struct MemoryProgress {
    completed: HashSet<usize>,
}

impl ProgressStore for MemoryProgress {
    fn mark_level_complete(&mut self, level: usize) {
        self.completed.insert(level);
    }

    fn is_level_complete(&self, level: usize) -> bool {
        self.completed.contains(&level)
    }

    fn completed_count(&self) -> usize {
        self.completed.len()
    }

    fn reset(&mut self) {
        self.completed.clear();
    }
}
