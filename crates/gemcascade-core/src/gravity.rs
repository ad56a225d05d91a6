//! Gravity compaction.

use crate::{Gem, Grid, Position};

/// A gem that moved down during [`apply_gravity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    /// The gem that fell.
    pub gem: Gem,
    /// The cell it occupied before falling.
    pub from: Position,
    /// The cell it occupies after falling.
    pub to: Position,
}

impl Fall {
    /// Returns the number of rows the gem fell.
    #[must_use]
    #[expect(clippy::cast_sign_loss)]
    pub fn distance(&self) -> u32 {
        (self.from.y() - self.to.y()) as u32
    }
}

/// Lets every gem fall into the empty cells below it.
///
/// Columns are processed left to right, each from the bottom (`y = 0`) up.
/// A gem falls by the number of empty cells counted below it in the column as
/// it was before the pass; since gems are visited bottom-up, every target cell
/// has already been vacated. Afterwards all empty cells of a column sit above
/// all of its gems.
///
/// Returns one [`Fall`] per moved gem, grouped by column.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{Grid, Position, apply_gravity};
///
/// let mut grid: Grid = "
///     AB
///     .C
///     C.
///     .A
/// "
/// .parse()?;
///
/// let falls = apply_gravity(&mut grid);
/// assert_eq!(grid.to_string(), "..\n.B\nAC\nCA");
/// assert_eq!(falls.len(), 4);
/// assert_eq!(falls[1].from, Position::new(0, 3));
/// assert_eq!(falls[1].distance(), 2);
/// # Ok::<(), gemcascade_core::GridParseError>(())
/// ```
pub fn apply_gravity(grid: &mut Grid) -> Vec<Fall> {
    (0..grid.width())
        .flat_map(|x| apply_column_gravity(grid, x))
        .collect()
}

/// Lets the gems of column `x` fall, leaving every other column untouched.
///
/// [`apply_gravity`] is this function applied to each column from left to
/// right. Returns the falls of the column, bottom-up.
///
/// # Panics
///
/// Panics if `x` is not a column of the grid.
#[track_caller]
pub fn apply_column_gravity(grid: &mut Grid, x: i32) -> Vec<Fall> {
    assert!(
        (0..grid.width()).contains(&x),
        "column {x} is outside the grid"
    );

    let mut falls = Vec::new();
    let mut shift = 0;
    for y in 0..grid.height() {
        let from = Position::new(x, y);
        if grid.is_empty_at(from) {
            shift += 1;
            continue;
        }
        if shift == 0 {
            continue;
        }
        let to = Position::new(x, y - shift);
        if let Some(gem) = grid.take(from) {
            grid.set(to, Some(gem));
            falls.push(Fall { gem, from, to });
        }
    }
    falls
}
