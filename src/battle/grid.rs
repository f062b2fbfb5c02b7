//! Square grid coordinates for the battlefield
//!
//! Cells are addressed by (x, y) with x across the columns and y down the
//! rows. Movement is 8-directional with a uniform step cost.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell on the battlefield grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

/// Neighbor offsets in expansion order.
///
/// BFS visits neighbors in exactly this order, which is what makes the chosen
/// path deterministic among equal-length alternatives.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// All 8 neighboring cells in `DIRECTIONS` order (may be off-field)
    pub fn neighbors(&self) -> [GridCoord; 8] {
        DIRECTIONS.map(|(dx, dy)| GridCoord::new(self.x + dx, self.y + dy))
    }

    /// Steps between two cells when diagonal moves cost the same as straight ones
    pub fn chebyshev_distance(&self, other: &Self) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// True if `other` is one king-move away
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self != other && self.chebyshev_distance(other) == 1
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular field extent, zero-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBounds {
    pub width: i32,
    pub height: i32,
}

impl FieldBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self::new(
            crate::battle::constants::FIELD_WIDTH,
            crate::battle::constants::FIELD_HEIGHT,
        )
    }
}
