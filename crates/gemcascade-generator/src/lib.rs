//! Gem type allocation and board generation.
//!
//! New gems get their type from a [`TypeAllocator`], which filters the
//! configured [`GemPalette`] down to the types that would not complete a run
//! with the gems already on the board and lets an injected [`TypePicker`]
//! choose among them. [`SeededPicker`] is the production picker, a PCG
//! generator seeded from a [`BoardSeed`]; [`testing`] provides deterministic
//! pickers.
//!
//! [`BoardGenerator`] uses the same allocator to populate a fresh board.
//!
//! # Examples
//!
//! ```
//! use gemcascade_core::find_matches;
//! use gemcascade_generator::{BoardGenerator, BoardSeed, GemPalette};
//!
//! let generator = BoardGenerator::new(8, 8, GemPalette::with_count(5)?);
//! let seed: BoardSeed = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1".parse()?;
//!
//! let board = generator.generate_with_seed(seed);
//! assert!(find_matches(&board.grid).is_empty());
//! assert_eq!(
//!     board.grid.to_string(),
//!     generator.generate_with_seed(seed).grid.to_string(),
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod allocator;
mod generator;
mod palette;
mod picker;
mod seed;
pub mod testing;

pub use self::{
    allocator::{Allocation, TypeAllocator},
    generator::{BoardGenerator, GeneratedBoard},
    palette::{DEFAULT_GEM_TYPES, GemPalette, PaletteError},
    picker::{SeededPicker, TypePicker},
    seed::{BoardSeed, SeedParseError},
};
