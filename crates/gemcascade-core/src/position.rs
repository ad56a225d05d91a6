//! Board coordinates.

use std::{cmp::Ordering, fmt};

/// A cell coordinate on the board.
///
/// `x` grows to the right and `y` grows upward, so `y = 0` is the bottom row.
/// Coordinates are signed so that positions coming from outside the board
/// (for example a tap translated from screen space) can be represented and
/// rejected with [`Grid::is_valid`].
///
/// Positions order row-major: first by `y`, then by `x`.
///
/// [`Grid::is_valid`]: crate::Grid::is_valid
///
/// # Examples
///
/// ```
/// use gemcascade_core::Position;
///
/// let a = Position::new(1, 0);
/// assert!(a.is_adjacent(Position::new(2, 0)));
/// assert!(a.is_adjacent(Position::new(1, 1)));
/// assert!(!a.is_adjacent(Position::new(2, 1)));
/// assert!(!a.is_adjacent(a));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a position from its column and row.
    #[must_use]
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the column.
    #[must_use]
    #[inline]
    pub const fn x(self) -> i32 {
        self.x
    }

    /// Returns the row (`0` is the bottom row).
    #[must_use]
    #[inline]
    pub const fn y(self) -> i32 {
        self.y
    }

    /// Returns the position shifted by `(dx, dy)`.
    #[must_use]
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the Manhattan distance between two positions.
    ///
    /// Saturates at `u32::MAX` for positions further apart than that.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Returns `true` if `other` shares an edge with this position.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
