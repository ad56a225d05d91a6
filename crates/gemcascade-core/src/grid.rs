//! The board: a fixed-size grid of optional gems.
//!
//! # Text format
//!
//! [`Grid`] implements [`FromStr`] and [`Display`] with a compact text format
//! that is convenient in tests and logs:
//!
//! - one line per row, **top row first** (the last line is `y = 0`)
//! - `A`-`Z` for gem types, `.` or `_` for empty cells
//! - blank lines and leading/trailing whitespace are ignored
//!
//! Parsed gems receive identities in reading order.
//!
//! ```
//! use gemcascade_core::{GemType, Grid, Position};
//!
//! let grid: Grid = "
//!     AB.C
//!     CABA
//! "
//! .parse()?;
//!
//! assert_eq!(grid.width(), 4);
//! assert_eq!(grid.height(), 2);
//! assert_eq!(grid.gem_type_at(Position::new(0, 0)), Some(GemType::new(2)));
//! assert!(grid.is_empty_at(Position::new(2, 1)));
//! # Ok::<(), gemcascade_core::GridParseError>(())
//! ```

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Gem, GemId, GemType, Layout, Position, WorldPoint};

/// A `width × height` board of optional gems.
///
/// The grid is created once and never resized; afterwards only individual
/// cells are cleared and refilled. Addressing a cell outside the bounds is a
/// contract violation and panics: callers check [`Grid::is_valid`] first.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{GemType, Grid, Position};
///
/// let mut grid = Grid::new(3, 3);
/// let pos = Position::new(1, 2);
/// assert!(grid.is_valid(pos));
/// assert!(!grid.is_valid(Position::new(3, 0)));
///
/// let gem = grid.spawn(pos, GemType::new(0));
/// assert_eq!(grid.get(pos), Some(&gem));
/// assert_eq!(grid.take(pos), Some(gem));
/// assert!(grid.is_empty_at(pos));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Option<Gem>>,
    layout: Layout,
    next_id: u32,
}

impl Grid {
    /// Creates an empty grid with the default [`Layout`].
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width: i32::from(width),
            height: i32::from(height),
            cells: vec![None; usize::from(width) * usize::from(height)],
            layout: Layout::default(),
            next_id: 0,
        }
    }

    /// Replaces the world-space layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the number of columns.
    #[must_use]
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the world-space layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    #[inline]
    pub fn is_valid(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x()) && (0..self.height).contains(&pos.y())
    }

    #[track_caller]
    fn index(&self, pos: Position) -> usize {
        assert!(
            self.is_valid(pos),
            "position {pos} is outside the {}x{} grid",
            self.width,
            self.height
        );
        #[expect(clippy::cast_sign_loss)]
        let index = (pos.y() * self.width + pos.x()) as usize;
        index
    }

    /// Returns the gem at `pos`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[must_use]
    #[track_caller]
    pub fn get(&self, pos: Position) -> Option<&Gem> {
        self.cells[self.index(pos)].as_ref()
    }

    /// Returns a mutable reference to the gem at `pos`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[track_caller]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Gem> {
        let index = self.index(pos);
        self.cells[index].as_mut()
    }

    /// Returns the type of the gem at `pos`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[must_use]
    #[track_caller]
    pub fn gem_type_at(&self, pos: Position) -> Option<GemType> {
        self.get(pos).map(Gem::gem_type)
    }

    /// Returns `true` if the cell at `pos` holds no gem.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[must_use]
    #[track_caller]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Stores `gem` at `pos` and returns the previous occupant.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[track_caller]
    pub fn set(&mut self, pos: Position, gem: Option<Gem>) -> Option<Gem> {
        let index = self.index(pos);
        std::mem::replace(&mut self.cells[index], gem)
    }

    /// Removes and returns the gem at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[track_caller]
    pub fn take(&mut self, pos: Position) -> Option<Gem> {
        self.set(pos, None)
    }

    /// Exchanges the contents of two cells.
    ///
    /// # Panics
    ///
    /// Panics if either position is outside the grid.
    #[track_caller]
    pub fn swap(&mut self, a: Position, b: Position) {
        let (a, b) = (self.index(a), self.index(b));
        self.cells.swap(a, b);
    }

    /// Creates a new gem of `gem_type` at the empty cell `pos` and returns it.
    ///
    /// The gem receives the next unused [`GemId`] of this grid.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid or already occupied.
    #[track_caller]
    pub fn spawn(&mut self, pos: Position, gem_type: GemType) -> Gem {
        let index = self.index(pos);
        assert!(
            self.cells[index].is_none(),
            "cannot spawn a gem on occupied cell {pos}"
        );
        let gem = Gem::new(GemId::new(self.next_id), gem_type);
        self.next_id += 1;
        self.cells[index] = Some(gem);
        gem
    }

    /// Returns the world-space center of the cell at `pos`.
    #[must_use]
    pub fn world_center(&self, pos: Position) -> WorldPoint {
        self.layout.world_center(pos)
    }

    /// Returns every position of the grid in fill order: column by column from
    /// left to right, bottom to top within each column.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }

    /// Returns the occupied cells and their gems in fill order.
    pub fn gems(&self) -> impl Iterator<Item = (Position, &Gem)> {
        self.positions()
            .filter_map(move |pos| self.get(pos).map(|gem| (pos, gem)))
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Returns `true` if every cell holds a gem.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                match self.gem_type_at(Position::new(x, y)) {
                    Some(gem_type) => write!(f, "{gem_type}")?,
                    None => f.write_str(".")?,
                }
            }
            if y > 0 {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

/// An error returned when parsing a [`Grid`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// The input contained no rows.
    #[display("grid text contains no rows")]
    Empty,
    /// A row had a different length from the first row.
    #[display("row {line} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index in reading order.
        line: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A character was neither a gem letter nor an empty-cell marker.
    #[display("invalid cell character {found:?} at row {line}, column {column}")]
    InvalidCell {
        /// Zero-based row index in reading order.
        line: usize,
        /// Zero-based column index.
        column: usize,
        /// The offending character.
        found: char,
    },
    /// The grid does not fit the supported dimensions.
    #[display("grid dimensions exceed 65535x65535")]
    TooLarge,
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let expected = rows.first().ok_or(GridParseError::Empty)?.len();
        let width = u16::try_from(expected).map_err(|_| GridParseError::TooLarge)?;
        let height = u16::try_from(rows.len()).map_err(|_| GridParseError::TooLarge)?;
        let mut grid = Grid::new(width, height);

        for (line, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(GridParseError::RaggedRow {
                    line,
                    expected,
                    found: row.len(),
                });
            }
            #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let y = grid.height - 1 - line as i32;
            for (column, &c) in row.iter().enumerate() {
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let pos = Position::new(column as i32, y);
                match c {
                    '.' | '_' => {}
                    _ => {
                        let gem_type = GemType::from_char(c).ok_or(GridParseError::InvalidCell {
                            line,
                            column,
                            found: c,
                        })?;
                        grid.spawn(pos, gem_type);
                    }
                }
            }
        }

        Ok(grid)
    }
}
