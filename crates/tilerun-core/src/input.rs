use serde::{Deserialize, Serialize};

/// Per-tick player intent, supplied by the input-handling collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Horizontal intent: -1 (left), 0, +1 (right).
    pub move_dir: i8,
    /// Whether a jump was requested this tick.
    pub jump: bool,
}

impl TickInput {
    pub fn new(move_dir: i8, jump: bool) -> Self {
        Self { move_dir, jump }
    }

    /// Copy with `move_dir` clamped to the valid -1..=1 band. Out-of-range
    /// values from a misbehaving input source degrade to full-speed intent
    /// rather than a speed boost.
    pub fn clamped(self) -> Self {
        Self {
            move_dir: self.move_dir.clamp(-1, 1),
            jump: self.jump,
        }
    }
}
