use gemcascade_core::{Layout, WorldPoint};
use gemcascade_generator::{BoardSeed, GemPalette, PaletteError};

use crate::RecheckPolicy;

/// Smallest supported board edge.
pub const MIN_BOARD_SIZE: u16 = 3;

/// Smallest palette that can always fill a board without immediate matches.
pub const MIN_GEM_TYPES: u8 = 3;

/// Palette size below which fill fallbacks become common.
pub const RECOMMENDED_GEM_TYPES: u8 = 5;

/// Configuration of a [`Game`](crate::Game) session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
    /// World-space edge length of a cell.
    pub cell_size: f32,
    /// World-space position of the lower-left corner of cell `(0, 0)`.
    pub origin: WorldPoint,
    /// Number of gem types (`A`, `B`, ...).
    pub gem_types: u8,
    /// Dump the board at debug level after every cascade.
    pub debug: bool,
    /// When new matches are looked for after a clear.
    pub recheck: RecheckPolicy,
    /// Seed for the board and refills; a random seed is drawn if unset.
    pub seed: Option<BoardSeed>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            cell_size: 1.0,
            origin: WorldPoint::ZERO,
            gem_types: RECOMMENDED_GEM_TYPES,
            debug: true,
            recheck: RecheckPolicy::default(),
            seed: None,
        }
    }
}

/// An error returned when a [`GameConfig`] is not well-formed.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    /// The board is smaller than 3x3.
    #[display("board must be at least {MIN_BOARD_SIZE}x{MIN_BOARD_SIZE}, got {width}x{height}")]
    #[from(ignore)]
    BoardTooSmall {
        /// Configured width.
        width: u16,
        /// Configured height.
        height: u16,
    },
    /// Fewer than three gem types were configured.
    #[display("at least {MIN_GEM_TYPES} gem types are required, got {count}")]
    #[from(ignore)]
    TooFewGemTypes {
        /// Configured number of types.
        count: u8,
    },
    /// The cell size is not a positive finite number.
    #[display("cell size must be positive and finite, got {cell_size}")]
    #[from(ignore)]
    InvalidCellSize {
        /// Configured cell size.
        cell_size: f32,
    },
    /// The palette could not be built.
    #[display("invalid gem palette: {_0}")]
    Palette(PaletteError),
}

impl GameConfig {
    /// Checks that the configuration describes a playable board.
    ///
    /// A palette below [`RECOMMENDED_GEM_TYPES`] is accepted with a warning.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first problem found:
    ///
    /// - [`ConfigError::BoardTooSmall`] if either edge is below
    ///   [`MIN_BOARD_SIZE`], since no run of three fits on such a board.
    /// - [`ConfigError::TooFewGemTypes`] for fewer than [`MIN_GEM_TYPES`]
    ///   types. With one type every refilled cell extends a run, so a cascade
    ///   never settles. With two types the generator and refills fall back so
    ///   often that settling is not guaranteed either. The allocator itself
    ///   accepts such palettes; only game sessions refuse them.
    /// - [`ConfigError::InvalidCellSize`] for a zero, negative or non-finite
    ///   cell size.
    /// - [`ConfigError::Palette`] if the palette cannot be built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_BOARD_SIZE || self.height < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.gem_types < MIN_GEM_TYPES {
            return Err(ConfigError::TooFewGemTypes {
                count: self.gem_types,
            });
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize {
                cell_size: self.cell_size,
            });
        }
        let _ = self.palette()?;
        if self.gem_types < RECOMMENDED_GEM_TYPES {
            log::warn!(
                "{} gem types configured, fewer than {RECOMMENDED_GEM_TYPES} makes fill fallbacks frequent",
                self.gem_types
            );
        }
        Ok(())
    }

    /// Builds the palette of the first [`gem_types`](Self::gem_types) types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Palette`] if the count is zero or too large.
    pub fn palette(&self) -> Result<GemPalette, ConfigError> {
        Ok(GemPalette::with_count(self.gem_types)?)
    }

    /// Returns the world-space layout of the board.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(self.cell_size, self.origin)
    }
}
