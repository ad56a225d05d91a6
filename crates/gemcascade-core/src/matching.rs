//! Match detection.
//!
//! A *run* is three or more gems of the same type contiguous in a row or a
//! column. [`find_matches`] collects every cell that belongs to a run;
//! [`would_create_match`] answers whether placing a type at one cell would
//! complete a run with the gems already on the board.

use std::collections::BTreeSet;

use crate::{GemType, Grid, Position};

/// Length of the smallest run that counts as a match.
pub const MATCH_LENGTH: i32 = 3;

/// The set of cells participating in at least one run.
///
/// A cell that belongs to both a horizontal and a vertical run appears once.
/// Iteration is in row-major order ([`Position`]'s ordering), which makes the
/// order of clear events reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    positions: BTreeSet<Position>,
}

impl MatchSet {
    /// Creates an empty match set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of matched cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if no cell is matched, i.e. the board is settled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns `true` if `pos` is part of a run.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Iterates over the matched cells in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }

    fn insert_window(&mut self, window: [Position; 3]) {
        self.positions.extend(window);
    }
}

impl IntoIterator for MatchSet {
    type Item = Position;
    type IntoIter = std::collections::btree_set::IntoIter<Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = Position;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, Position>>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter().copied()
    }
}

impl FromIterator<Position> for MatchSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

fn window_matches(grid: &Grid, window: [Position; 3]) -> bool {
    let [a, b, c] = window.map(|pos| grid.gem_type_at(pos));
    matches!((a, b, c), (Some(a), Some(b), Some(c)) if a == b && b == c)
}

/// Scans the grid for horizontal and vertical runs of three or more.
///
/// Every window of three consecutive cells is tested independently, so a run
/// of four contributes two overlapping windows and all four cells end up in
/// the result. Empty cells disqualify any window containing them. The scan
/// has no side effects and returns an empty set on a settled board.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{Grid, Position, find_matches};
///
/// let grid: Grid = "
///     BCAC
///     BCBC
///     AAAA
/// "
/// .parse()?;
///
/// let matches = find_matches(&grid);
/// assert_eq!(matches.len(), 4);
/// assert!(matches.contains(Position::new(3, 0)));
/// assert!(!matches.contains(Position::new(0, 1)));
/// # Ok::<(), gemcascade_core::GridParseError>(())
/// ```
#[must_use]
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut matches = MatchSet::new();

    for y in 0..grid.height() {
        for x in 0..=grid.width() - MATCH_LENGTH {
            let window = [0, 1, 2].map(|i| Position::new(x + i, y));
            if window_matches(grid, window) {
                matches.insert_window(window);
            }
        }
    }

    for x in 0..grid.width() {
        for y in 0..=grid.height() - MATCH_LENGTH {
            let window = [0, 1, 2].map(|i| Position::new(x, y + i));
            if window_matches(grid, window) {
                matches.insert_window(window);
            }
        }
    }

    matches
}

/// The two partner offsets of each of the six windows that contain a cell:
/// three horizontal (cell on the right, middle, left) and three vertical.
const WINDOW_PARTNERS: [[(i32, i32); 2]; 6] = [
    [(-2, 0), (-1, 0)],
    [(-1, 0), (1, 0)],
    [(1, 0), (2, 0)],
    [(0, -2), (0, -1)],
    [(0, -1), (0, 1)],
    [(0, 1), (0, 2)],
];

/// Returns `true` if a gem of `gem_type` at `pos` would complete a run with
/// the gems currently on the board.
///
/// Only the six three-cell windows that include `pos` are inspected, and only
/// gems that already exist count: windows reaching outside the board or into
/// empty cells never match. The current content of `pos` itself is ignored.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{GemType, Grid, Position, would_create_match};
///
/// let grid: Grid = "AA..".parse()?;
/// let a = GemType::new(0);
/// let b = GemType::new(1);
/// assert!(would_create_match(&grid, Position::new(2, 0), a));
/// assert!(!would_create_match(&grid, Position::new(2, 0), b));
/// assert!(!would_create_match(&grid, Position::new(3, 0), a));
/// # Ok::<(), gemcascade_core::GridParseError>(())
/// ```
#[must_use]
pub fn would_create_match(grid: &Grid, pos: Position, gem_type: GemType) -> bool {
    WINDOW_PARTNERS.iter().any(|partners| {
        partners.iter().all(|&(dx, dy)| {
            let partner = pos.offset(dx, dy);
            grid.is_valid(partner) && grid.gem_type_at(partner) == Some(gem_type)
        })
    })
}
