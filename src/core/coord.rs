//! Integer grid coordinates.
//!
//! `Coord` is the key type for every ownership set, registry and map in the
//! engine. Adjacency is orthogonal only; distances are Manhattan.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Orthogonal neighbors of a cell. Never more than four, so no heap allocation.
pub type Neighbors = SmallVec<[Coord; 4]>;

/// Immutable (x, y) grid position.
///
/// Ordering is lexicographic on `(x, y)`; the planner sorts candidates with it
/// before shuffling so that draws depend only on the random source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Orthogonal neighbors: right, left, down, up.
    ///
    /// No bounds are applied; use `World::neighbors` for in-bounds cells.
    ///
    /// ```
    /// use rust_conquest::core::Coord;
    ///
    /// let n = Coord::new(0, 0).neighbors();
    /// assert_eq!(n.len(), 4);
    /// assert!(n.contains(&Coord::new(-1, 0)));
    /// ```
    #[must_use]
    pub fn neighbors(self) -> Neighbors {
        let mut out = Neighbors::new();
        out.push(Coord::new(self.x + 1, self.y));
        out.push(Coord::new(self.x - 1, self.y));
        out.push(Coord::new(self.x, self.y + 1));
        out.push(Coord::new(self.x, self.y - 1));
        out
    }

    /// Manhattan distance to another coordinate.
    #[must_use]
    pub const fn manhattan(self, other: Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Whether `other` shares an edge with this cell.
    #[must_use]
    pub const fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// Check against a `width` x `height` grid anchored at the origin.
    #[must_use]
    pub const fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }

    /// Component-wise offset.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
