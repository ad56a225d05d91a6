//! Interaction and cascade sequencing for the gemcascade match-3 engine.
//!
//! - [`Selection`] turns cell taps into selections and swap requests.
//! - [`Cascade`] resolves one swap: swap, revert or clear, fall, refill, and
//!   re-check until the board is settled. Each phase is a separate step.
//! - [`Game`] ties a board, its allocator, the selection and the in-flight
//!   cascade together, configured by [`GameConfig`].
//!
//! Everything observable is reported as an ordered list of [`Event`]s.
//!
//! # Examples
//!
//! ```
//! use gemcascade_core::Position;
//! use gemcascade_game::{Event, Game, RecheckPolicy};
//! use gemcascade_generator::{GemPalette, testing::CyclicPicker};
//!
//! let board = "
//!     CAB
//!     ABC
//!     BCA
//!     AAB
//! ";
//! let mut game = Game::from_grid_with_palette(
//!     board.parse()?,
//!     GemPalette::with_count(3)?,
//!     CyclicPicker::new(),
//!     RecheckPolicy::AfterRefill,
//! );
//!
//! let events = game.resolve(Position::new(2, 0), Position::new(2, 1));
//! assert!(events[1].is_cleared());
//! assert!(matches!(events.last(), Some(Event::Settled { .. })));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cascade;
mod config;
mod event;
mod game;
mod selection;

pub use self::{
    cascade::{Cascade, CascadeStats, CascadeStep, Phase, RecheckPolicy, StepKind, resolve},
    config::{ConfigError, GameConfig, MIN_BOARD_SIZE, MIN_GEM_TYPES, RECOMMENDED_GEM_TYPES},
    event::Event,
    game::Game,
    selection::{Selection, SelectionOutcome},
};
