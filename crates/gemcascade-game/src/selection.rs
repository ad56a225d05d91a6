use gemcascade_core::{Grid, Position};

use crate::Event;

/// The result of feeding one tap to a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SelectionOutcome {
    /// The tap hit an empty or out-of-bounds cell; nothing changed.
    Ignored,
    /// Nothing was selected; the tapped cell is now selected.
    Selected(Position),
    /// The selected cell was tapped again and is no longer selected.
    Deselected(Position),
    /// A non-adjacent cell was tapped; the selection moved to it.
    Reselected {
        /// The previously selected cell.
        from: Position,
        /// The newly selected cell.
        to: Position,
    },
    /// A cell adjacent to the selection was tapped. The selection is cleared
    /// and the pair should be handed to the cascade resolver.
    SwapRequested(Position, Position),
}

impl SelectionOutcome {
    /// Returns the events this outcome emits, in order.
    ///
    /// A swap request emits nothing here; the cascade reports the swap.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        match *self {
            Self::Ignored | Self::SwapRequested(..) => vec![],
            Self::Selected(pos) => vec![Event::Selected(pos)],
            Self::Deselected(pos) => vec![Event::Deselected(pos)],
            Self::Reselected { from, to } => vec![Event::Deselected(from), Event::Selected(to)],
        }
    }
}

/// Tracks the single selected cell and turns taps into swap requests.
///
/// The selected gem's highlight flag mirrors the selection.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{Grid, Position};
/// use gemcascade_game::{Selection, SelectionOutcome};
///
/// let mut grid: Grid = "ABC\nCAB".parse()?;
/// let mut selection = Selection::new();
///
/// let a = Position::new(0, 0);
/// let b = Position::new(1, 0);
/// assert_eq!(selection.tap(&mut grid, a), SelectionOutcome::Selected(a));
/// assert!(grid.get(a).unwrap().is_highlighted());
///
/// assert_eq!(selection.tap(&mut grid, b), SelectionOutcome::SwapRequested(a, b));
/// assert_eq!(selection.selected(), None);
/// assert!(!grid.get(a).unwrap().is_highlighted());
/// # Ok::<(), gemcascade_core::GridParseError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Position>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected cell, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Returns `true` if no cell is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Applies a tap on `pos`.
    pub fn tap(&mut self, grid: &mut Grid, pos: Position) -> SelectionOutcome {
        if !grid.is_valid(pos) || grid.is_empty_at(pos) {
            return SelectionOutcome::Ignored;
        }

        let Some(current) = self.selected else {
            self.select(grid, pos);
            return SelectionOutcome::Selected(pos);
        };

        if current == pos {
            self.clear(grid);
            SelectionOutcome::Deselected(pos)
        } else if current.is_adjacent(pos) {
            self.clear(grid);
            SelectionOutcome::SwapRequested(current, pos)
        } else {
            self.clear(grid);
            self.select(grid, pos);
            SelectionOutcome::Reselected {
                from: current,
                to: pos,
            }
        }
    }

    /// Clears the selection without emitting anything, returning the cell
    /// that was selected.
    pub fn clear(&mut self, grid: &mut Grid) -> Option<Position> {
        let pos = self.selected.take()?;
        if let Some(gem) = grid.get_mut(pos) {
            gem.set_highlighted(false);
        }
        Some(pos)
    }

    fn select(&mut self, grid: &mut Grid, pos: Position) {
        if let Some(gem) = grid.get_mut(pos) {
            gem.set_highlighted(true);
        }
        self.selected = Some(pos);
    }
}
