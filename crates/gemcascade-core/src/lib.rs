//! Core data structures for the gemcascade match-3 engine.
//!
//! This crate holds the board model and the pure algorithms that operate on
//! it. Nothing here is random or stateful beyond the grid itself; type
//! allocation lives in `gemcascade-generator` and cascade sequencing in
//! `gemcascade-game`.
//!
//! # Overview
//!
//! - [`position`]: signed cell coordinates with row-major ordering
//! - [`gem`]: [`GemType`], [`GemId`] and [`Gem`]
//! - [`grid`]: the fixed-size [`Grid`] and its text format
//! - [`layout`]: cell-to-world mapping for presentation layers
//! - [`matching`]: [`find_matches`] and the six-window [`would_create_match`] test
//! - [`gravity`]: [`apply_gravity`] and per-column [`apply_column_gravity`] compaction
//!
//! # Examples
//!
//! ```
//! use gemcascade_core::{Grid, apply_gravity, find_matches};
//!
//! let mut grid: Grid = "
//!     BCA
//!     CBB
//!     AAA
//! "
//! .parse()?;
//!
//! let matches = find_matches(&grid);
//! for pos in &matches {
//!     grid.take(pos);
//! }
//! let falls = apply_gravity(&mut grid);
//!
//! assert_eq!(falls.len(), 6);
//! assert_eq!(grid.to_string(), "...\nBCA\nCBB");
//! # Ok::<(), gemcascade_core::GridParseError>(())
//! ```

pub mod gem;
pub mod gravity;
pub mod grid;
pub mod layout;
pub mod matching;
pub mod position;

pub use self::{
    gem::{Gem, GemId, GemType},
    gravity::{Fall, apply_column_gravity, apply_gravity},
    grid::{Grid, GridParseError},
    layout::{Layout, WorldPoint},
    matching::{MATCH_LENGTH, MatchSet, find_matches, would_create_match},
    position::Position,
};
