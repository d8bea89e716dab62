use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box. Every collision target in the game — player,
/// enemies, tile-derived rectangles — is expressed through this one type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (x + w).
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge (y + h). Screen coordinates: +y is down.
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Standard AABB overlap test, strict on all four sides: rectangles
    /// that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}
