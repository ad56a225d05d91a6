use gemcascade_core::{Grid, Position};
use gemcascade_generator::{
    BoardGenerator, BoardSeed, GemPalette, SeededPicker, TypeAllocator, TypePicker,
};

use crate::{
    Cascade, CascadeStats, CascadeStep, ConfigError, Event, GameConfig, Phase, RecheckPolicy,
    Selection, SelectionOutcome,
};

/// A match-3 game session.
///
/// The session owns the board, the type allocator, the selection and at most
/// one in-flight cascade. Input arrives as discrete cell taps; a tap next to
/// the selected gem starts a cascade, which the caller then drives one phase
/// at a time with [`step`](Self::step) (to animate between phases) or all at
/// once with [`finish`](Self::finish). Taps are ignored while a cascade is in
/// flight.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{Position, find_matches};
/// use gemcascade_game::{Event, Game, GameConfig};
///
/// let mut game = Game::new(&GameConfig::default())?;
/// assert!(find_matches(game.grid()).is_empty());
///
/// let a = Position::new(3, 3);
/// let b = Position::new(4, 3);
/// assert_eq!(game.tap(a), [Event::Selected(a)]);
/// assert!(game.tap(b).is_empty());
/// assert!(game.is_busy());
///
/// let events = game.finish();
/// assert_eq!(events[0], Event::Swapped { a, b });
/// assert!(events.last().unwrap().is_settled());
/// assert!(game.phase().is_idle());
/// # Ok::<(), gemcascade_game::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Game<P = SeededPicker> {
    grid: Grid,
    allocator: TypeAllocator<P>,
    selection: Selection,
    cascade: Option<Cascade>,
    recheck: RecheckPolicy,
    debug: bool,
    seed: Option<BoardSeed>,
    last_stats: Option<CascadeStats>,
}

impl Game<SeededPicker> {
    /// Starts a session on a freshly generated board.
    ///
    /// The board and every later refill draw from one PCG stream seeded with
    /// `config.seed`, or with a random seed if none is configured.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is not well-formed.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(BoardSeed::random);
        let mut game = Self::with_picker(config, SeededPicker::new(seed))?;
        game.seed = Some(seed);
        log::info!("new {}x{} game with seed {seed}", config.width, config.height);
        Ok(game)
    }
}

impl<P> Game<P>
where
    P: TypePicker,
{
    /// Starts a session on a freshly generated board, drawing types from
    /// `picker`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is not well-formed.
    pub fn with_picker(config: &GameConfig, picker: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let palette = config.palette()?;
        let generator = BoardGenerator::new(config.width, config.height, palette.clone())
            .with_layout(config.layout());
        let mut allocator = TypeAllocator::new(palette, picker);
        let grid = generator.populate(&mut allocator);

        let mut game = Self::from_grid(grid, allocator, config.recheck);
        game.debug = config.debug;
        game.dump_board("initial board");
        Ok(game)
    }

    /// Starts a session on an existing board.
    ///
    /// The board is used as is; it may contain matches, which are only
    /// resolved by the first successful swap.
    #[must_use]
    pub fn from_grid(grid: Grid, allocator: TypeAllocator<P>, recheck: RecheckPolicy) -> Self {
        Self {
            grid,
            allocator,
            selection: Selection::new(),
            cascade: None,
            recheck,
            debug: false,
            seed: None,
            last_stats: None,
        }
    }

    /// Starts a session on an existing board with the given palette.
    #[must_use]
    pub fn from_grid_with_palette(
        grid: Grid,
        palette: GemPalette,
        picker: P,
        recheck: RecheckPolicy,
    ) -> Self {
        Self::from_grid(grid, TypeAllocator::new(palette, picker), recheck)
    }

    /// Returns the board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the type allocator.
    #[must_use]
    pub fn allocator(&self) -> &TypeAllocator<P> {
        &self.allocator
    }

    /// Returns the selected cell, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Position> {
        self.selection.selected()
    }

    /// Returns the seed of the board, if the session was created from one.
    #[must_use]
    pub fn seed(&self) -> Option<BoardSeed> {
        self.seed
    }

    /// Returns the recheck policy used by cascades.
    #[must_use]
    pub fn recheck(&self) -> RecheckPolicy {
        self.recheck
    }

    /// Returns the resolver phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.cascade.as_ref().map_or(Phase::Idle, Cascade::phase)
    }

    /// Returns `true` while a cascade is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.cascade.is_some()
    }

    /// Returns the counters of the in-flight cascade, if any.
    #[must_use]
    pub fn cascade_stats(&self) -> Option<&CascadeStats> {
        self.cascade.as_ref().map(Cascade::stats)
    }

    /// Returns the counters of the most recently completed cascade.
    #[must_use]
    pub fn last_stats(&self) -> Option<&CascadeStats> {
        self.last_stats.as_ref()
    }

    /// Handles a tap on `pos`.
    ///
    /// Returns the selection events. A tap next to the selected gem starts a
    /// cascade and returns no events; the swap is reported by the first
    /// [`step`](Self::step). Taps on empty or out-of-bounds cells, and every
    /// tap while a cascade is in flight, are ignored.
    pub fn tap(&mut self, pos: Position) -> Vec<Event> {
        if self.is_busy() {
            log::debug!("ignoring tap on {pos} during {}", self.phase());
            return vec![];
        }

        let outcome = self.selection.tap(&mut self.grid, pos);
        log::trace!("tap on {pos}: {outcome:?}");
        if let SelectionOutcome::SwapRequested(a, b) = outcome {
            self.begin(a, b);
        }
        outcome.events()
    }

    /// Performs the next phase of the in-flight cascade.
    ///
    /// Returns `None` if no cascade is in flight.
    pub fn step(&mut self) -> Option<CascadeStep> {
        let cascade = self.cascade.as_mut()?;
        let step = cascade.advance(&mut self.grid, &mut self.allocator);
        if cascade.is_finished() {
            self.complete();
        }
        step
    }

    /// Runs the in-flight cascade to the end and returns its remaining events.
    pub fn finish(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(step) = self.step() {
            events.extend(step.events);
        }
        events
    }

    /// Swaps the gems at `a` and `b` and resolves the resulting cascade.
    ///
    /// Any selection is cleared silently before the swap.
    ///
    /// # Panics
    ///
    /// Panics if a cascade is already in flight, if either cell is outside
    /// the board or empty, or if the cells are not adjacent.
    #[track_caller]
    pub fn resolve(&mut self, a: Position, b: Position) -> Vec<Event> {
        assert!(
            !self.is_busy(),
            "cannot resolve {a} <-> {b} while a cascade is in flight"
        );
        self.selection.clear(&mut self.grid);
        self.begin(a, b);
        self.finish()
    }

    #[track_caller]
    fn begin(&mut self, a: Position, b: Position) {
        log::debug!("starting cascade {a} <-> {b}");
        self.cascade = Some(Cascade::new(&self.grid, a, b, self.recheck));
    }

    fn complete(&mut self) {
        let Some(cascade) = self.cascade.take() else {
            return;
        };
        let stats = *cascade.stats();
        log::debug!(
            "cascade settled: {} chain(s), {} cleared, {} fell, {} filled, {} fallback(s)",
            stats.chains,
            stats.cleared,
            stats.fell,
            stats.filled,
            stats.fallbacks
        );
        self.last_stats = Some(stats);
        self.selection.clear(&mut self.grid);
        self.dump_board("board after cascade");
    }

    fn dump_board(&self, label: &str) {
        if self.debug {
            log::debug!("{label}:\n{}", self.grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use gemcascade_core::find_matches;
    use gemcascade_generator::testing::CyclicPicker;

    use super::*;

    fn game(board: &str) -> Game<CyclicPicker> {
        Game::from_grid_with_palette(
            board.parse().unwrap(),
            GemPalette::with_count(3).unwrap(),
            CyclicPicker::new(),
            RecheckPolicy::AfterRefill,
        )
    }

    const BOARD: &str = "
        BCB
        CAC
        ABA
    ";

    #[test]
    fn test_same_seed_same_board() {
        let config = GameConfig {
            seed: Some(BoardSeed::from_bytes([9; 32])),
            ..GameConfig::default()
        };
        let a = Game::new(&config).unwrap();
        let b = Game::new(&config).unwrap();
        assert_eq!(a.grid().to_string(), b.grid().to_string());
        assert_eq!(a.seed(), config.seed);
        assert!(find_matches(a.grid()).is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            height: 1,
            ..GameConfig::default()
        };
        assert!(Game::new(&config).is_err());
    }

    #[test]
    fn test_layout_follows_config() {
        let config = GameConfig {
            cell_size: 0.5,
            ..GameConfig::default()
        };
        let game = Game::with_picker(&config, CyclicPicker::new()).unwrap();
        assert_eq!(game.grid().layout(), &config.layout());
        assert_eq!(game.grid().width(), 8);
    }

    #[test]
    fn test_taps_are_ignored_while_busy() {
        let mut game = game(BOARD);
        game.tap(Position::new(1, 0));
        assert!(game.tap(Position::new(1, 1)).is_empty());
        assert!(game.phase().is_swapping());

        assert!(game.tap(Position::new(0, 2)).is_empty());
        assert_eq!(game.selected(), None);

        let step = game.step().unwrap();
        assert!(step.kind.is_swap());
        assert!(game.phase().is_settling());
        assert!(game.tap(Position::new(0, 2)).is_empty());
    }

    #[test]
    fn test_step_until_idle() {
        let mut game = game(BOARD);
        game.tap(Position::new(1, 0));
        game.tap(Position::new(1, 1));

        let mut kinds = Vec::new();
        while let Some(step) = game.step() {
            kinds.push(step.kind);
        }
        assert_eq!(kinds.first(), Some(&crate::StepKind::Swap));
        assert_eq!(kinds.last(), Some(&crate::StepKind::Settle));
        assert!(!game.is_busy());
        assert!(game.step().is_none());
        assert!(game.last_stats().unwrap().chains >= 1);
    }

    #[test]
    fn test_cascade_stats_track_the_cascade_in_flight() {
        let mut game = game(BOARD);
        assert_eq!(game.recheck(), RecheckPolicy::AfterRefill);
        assert!(game.cascade_stats().is_none());

        game.tap(Position::new(1, 0));
        game.tap(Position::new(1, 1));
        assert_eq!(game.cascade_stats(), Some(&CascadeStats::default()));

        game.step();
        game.step();
        let stats = *game.cascade_stats().unwrap();
        assert_eq!((stats.chains, stats.cleared), (1, 3));
        assert!(game.last_stats().is_none());

        game.finish();
        assert!(game.cascade_stats().is_none());
        assert_eq!(game.last_stats().unwrap().cleared, game.last_stats().unwrap().filled);
    }

    #[test]
    fn test_recheck_follows_config() {
        let config = GameConfig {
            recheck: RecheckPolicy::AfterEachColumn,
            ..GameConfig::default()
        };
        let game = Game::with_picker(&config, CyclicPicker::new()).unwrap();
        assert_eq!(game.recheck(), RecheckPolicy::AfterEachColumn);
    }

    #[test]
    fn test_resolve_clears_selection() {
        let mut game = game(BOARD);
        let selected = Position::new(2, 2);
        game.tap(selected);
        assert!(game.grid().get(selected).unwrap().is_highlighted());

        let events = game.resolve(Position::new(1, 0), Position::new(1, 1));
        assert!(events.last().unwrap().is_settled());
        assert_eq!(game.selected(), None);
        assert!(game.grid().gems().all(|(_, gem)| !gem.is_highlighted()));
    }

    #[test]
    fn test_reverted_swap_clears_selection() {
        let mut game = game(BOARD);
        let before = game.grid().clone();
        game.tap(Position::new(0, 0));
        game.tap(Position::new(0, 1));
        let events = game.finish();
        assert_eq!(events.len(), 3);
        assert!(events[1].is_no_match());
        assert_eq!(game.grid(), &before);
        assert!(game.last_stats().unwrap().reverted);
    }

    #[test]
    #[should_panic(expected = "while a cascade is in flight")]
    fn test_resolve_while_busy_panics() {
        let mut game = game(BOARD);
        game.tap(Position::new(1, 0));
        game.tap(Position::new(1, 1));
        game.resolve(Position::new(0, 0), Position::new(0, 1));
    }
}
