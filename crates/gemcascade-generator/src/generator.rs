use gemcascade_core::{Grid, Layout};

use crate::{BoardSeed, GemPalette, SeededPicker, TypeAllocator, TypePicker};

/// Builds fully populated boards with no immediate matches.
///
/// Cells are filled in column-major order, bottom to top within each column,
/// each with the no-immediate-match constraint against the gems placed so
/// far. With three or more types every allocation has a valid candidate, so
/// the generated board is settled; smaller palettes may fall back.
///
/// # Examples
///
/// ```
/// use gemcascade_core::find_matches;
/// use gemcascade_generator::{BoardGenerator, GemPalette};
///
/// let generator = BoardGenerator::new(8, 8, GemPalette::default());
/// let board = generator.generate();
///
/// assert!(board.grid.is_full());
/// assert!(find_matches(&board.grid).is_empty());
/// assert_eq!(board.fallbacks, 0);
/// ```
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    width: u16,
    height: u16,
    layout: Layout,
    palette: GemPalette,
}

/// A board produced by [`BoardGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratedBoard {
    /// The populated grid.
    pub grid: Grid,
    /// The seed that reproduces this board.
    pub seed: BoardSeed,
    /// Number of cells that needed the full-palette fallback.
    pub fallbacks: usize,
}

impl BoardGenerator {
    /// Creates a generator for `width` x `height` boards.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: u16, height: u16, palette: GemPalette) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        Self {
            width,
            height,
            layout: Layout::default(),
            palette,
        }
    }

    /// Sets the cell layout attached to generated grids.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the palette boards are drawn from.
    #[must_use]
    pub fn palette(&self) -> &GemPalette {
        &self.palette
    }

    /// Generates a board from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedBoard {
        self.generate_with_seed(BoardSeed::random())
    }

    /// Generates the board determined by `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: BoardSeed) -> GeneratedBoard {
        let mut allocator = TypeAllocator::new(self.palette.clone(), SeededPicker::new(seed));
        let grid = self.populate(&mut allocator);
        GeneratedBoard {
            grid,
            seed,
            fallbacks: allocator.fallbacks(),
        }
    }

    /// Generates a board drawing types from an existing allocator.
    ///
    /// The allocator keeps its state afterwards, so a game session can go on
    /// using the same random stream for refills.
    pub fn populate<P>(&self, allocator: &mut TypeAllocator<P>) -> Grid
    where
        P: TypePicker,
    {
        let mut grid = Grid::new(self.width, self.height).with_layout(self.layout);
        let before = allocator.fallbacks();
        for pos in grid.positions() {
            allocator.fill(&mut grid, pos, true);
        }
        log::debug!(
            "generated {}x{} board with {} fallback(s)",
            self.width,
            self.height,
            allocator.fallbacks() - before
        );
        grid
    }
}
