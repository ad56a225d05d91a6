//! The cascade resolver.
//!
//! A cascade starts with a swap of two adjacent gems and runs until the board
//! holds no match. It is modelled as an explicit stepper: [`Cascade::advance`]
//! performs exactly one phase and returns the events that phase produced, so a
//! presentation layer can animate each phase before asking for the next one.
//!
//! ```text
//! Swap ── no match ──> Revert ──────────────────────────┐
//!   │                                                   v
//!   └── match ──> Clear ──> Fall ──> Refill ── none ──> Settle
//!                   ^        │         │
//!                   └────────┴─────────┘
//!                          matches
//! ```
//!
//! Where the resolver looks for new matches between a clear and the next one
//! is set by [`RecheckPolicy`].

use gemcascade_core::{Grid, MatchSet, Position, apply_column_gravity, apply_gravity, find_matches};
use gemcascade_generator::{TypeAllocator, TypePicker};

use crate::Event;

/// Coarse state of the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Phase {
    /// No cascade is in flight; taps are accepted.
    #[default]
    #[display("idle")]
    Idle,
    /// The swap has been performed (or is about to be reverted).
    #[display("swapping")]
    Swapping,
    /// Matches are being cleared, gems are falling or cells are refilling.
    #[display("settling")]
    Settling,
}

/// When the resolver looks for new matches after a clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum RecheckPolicy {
    /// Let every column fall, fill every empty cell, then check the whole
    /// board once.
    #[default]
    #[display("after-refill")]
    AfterRefill,
    /// Check after every new gem. As soon as a match shows up the rest of the
    /// refill is abandoned; it resumes after that chain has fallen.
    #[display("after-each-gem")]
    AfterEachGem,
    /// Check after every column that moved while falling. A match found this
    /// way is cleared before the remaining columns fall, and no refill
    /// happens until a fall pass completes without one.
    #[display("after-each-column")]
    AfterEachColumn,
}

/// The kind of phase a [`CascadeStep`] performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum StepKind {
    /// The two gems were exchanged.
    #[display("swap")]
    Swap,
    /// The swap formed no match and was undone.
    #[display("revert")]
    Revert,
    /// Matched gems were removed.
    #[display("clear")]
    Clear,
    /// Gravity compacted the columns.
    #[display("fall")]
    Fall,
    /// Empty cells received new gems.
    #[display("refill")]
    Refill,
    /// The board is settled and the cascade is over.
    #[display("settle")]
    Settle,
}

/// The outcome of one [`Cascade::advance`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// The phase that was performed.
    pub kind: StepKind,
    /// The events of the phase, in emission order.
    pub events: Vec<Event>,
}

/// Counters describing one cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeStats {
    /// Number of clear rounds.
    pub chains: usize,
    /// Gems removed by matches.
    pub cleared: usize,
    /// Gems moved by gravity.
    pub fell: usize,
    /// Gems created by refills.
    pub filled: usize,
    /// Refill allocations that needed the full-palette fallback.
    pub fallbacks: usize,
    /// `true` if the swap formed no match and was undone.
    pub reverted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Swap,
    Revert,
    Clear(MatchSet),
    Fall,
    Refill,
    Settle,
    Done,
}

/// One swap-initiated resolution cycle.
///
/// The cascade does not own the board: every [`advance`](Self::advance) call
/// borrows the grid and the allocator of the session that started it. The
/// same grid must be passed to every call.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{Grid, Position, find_matches};
/// use gemcascade_game::{Cascade, Event, RecheckPolicy, StepKind};
/// use gemcascade_generator::{GemPalette, TypeAllocator, testing::CyclicPicker};
///
/// let mut grid: Grid = "
///     CBC
///     BAB
///     ABA
/// "
/// .parse()?;
/// let mut allocator = TypeAllocator::new(GemPalette::with_count(3)?, CyclicPicker::new());
///
/// let (a, b) = (Position::new(1, 0), Position::new(1, 1));
/// let mut cascade = Cascade::new(&grid, a, b, RecheckPolicy::AfterRefill);
///
/// let step = cascade.advance(&mut grid, &mut allocator).unwrap();
/// assert_eq!(step.kind, StepKind::Swap);
/// assert_eq!(step.events, [Event::Swapped { a, b }]);
///
/// let events = cascade.run(&mut grid, &mut allocator);
/// assert!(events.last().unwrap().is_settled());
/// assert!(find_matches(&grid).is_empty());
/// assert!(cascade.is_finished());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cascade {
    a: Position,
    b: Position,
    policy: RecheckPolicy,
    stage: Stage,
    stats: CascadeStats,
}

impl Cascade {
    /// Prepares a cascade for swapping the gems at `a` and `b`.
    ///
    /// Nothing is changed until the first [`advance`](Self::advance).
    ///
    /// # Panics
    ///
    /// Panics if either cell is outside the grid or empty, or if the cells
    /// are not orthogonally adjacent.
    #[must_use]
    #[track_caller]
    pub fn new(grid: &Grid, a: Position, b: Position, policy: RecheckPolicy) -> Self {
        for pos in [a, b] {
            assert!(grid.is_valid(pos), "cannot swap {pos}: outside the grid");
            assert!(!grid.is_empty_at(pos), "cannot swap {pos}: cell is empty");
        }
        assert!(a.is_adjacent(b), "cannot swap {a} and {b}: cells are not adjacent");

        Self {
            a,
            b,
            policy,
            stage: Stage::Swap,
            stats: CascadeStats::default(),
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.stage {
            Stage::Swap | Stage::Revert => Phase::Swapping,
            Stage::Clear(_) | Stage::Fall | Stage::Refill | Stage::Settle => Phase::Settling,
            Stage::Done => Phase::Idle,
        }
    }

    /// Returns the kind of the next step, or `None` once finished.
    #[must_use]
    pub fn next_step(&self) -> Option<StepKind> {
        Some(match self.stage {
            Stage::Swap => StepKind::Swap,
            Stage::Revert => StepKind::Revert,
            Stage::Clear(_) => StepKind::Clear,
            Stage::Fall => StepKind::Fall,
            Stage::Refill => StepKind::Refill,
            Stage::Settle => StepKind::Settle,
            Stage::Done => return None,
        })
    }

    /// Returns `true` once the `Settle` step has been performed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Returns the counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> &CascadeStats {
        &self.stats
    }

    /// Performs the next phase, or returns `None` if the cascade is finished.
    pub fn advance<P>(
        &mut self,
        grid: &mut Grid,
        allocator: &mut TypeAllocator<P>,
    ) -> Option<CascadeStep>
    where
        P: TypePicker,
    {
        let stage = std::mem::replace(&mut self.stage, Stage::Done);
        let (kind, events) = match stage {
            Stage::Swap => (StepKind::Swap, self.swap(grid)),
            Stage::Revert => (StepKind::Revert, self.revert(grid)),
            Stage::Clear(matches) => (StepKind::Clear, self.clear(grid, &matches)),
            Stage::Fall => (StepKind::Fall, self.fall(grid)),
            Stage::Refill => (StepKind::Refill, self.refill(grid, allocator)),
            Stage::Settle => (StepKind::Settle, self.settle()),
            Stage::Done => return None,
        };
        log::debug!(
            "cascade {} <-> {}: {kind} emitted {} event(s), next {}",
            self.a,
            self.b,
            events.len(),
            self.next_step().map_or_else(|| "none".to_owned(), |kind| kind.to_string()),
        );
        for event in &events {
            log::trace!("{event}");
        }
        Some(CascadeStep { kind, events })
    }

    /// Runs the remaining phases and returns their events in order.
    pub fn run<P>(&mut self, grid: &mut Grid, allocator: &mut TypeAllocator<P>) -> Vec<Event>
    where
        P: TypePicker,
    {
        let mut events = Vec::new();
        while let Some(step) = self.advance(grid, allocator) {
            events.extend(step.events);
        }
        events
    }

    fn swap(&mut self, grid: &mut Grid) -> Vec<Event> {
        grid.swap(self.a, self.b);
        let matches = find_matches(grid);
        self.stage = if matches.is_empty() {
            Stage::Revert
        } else {
            Stage::Clear(matches)
        };
        vec![Event::Swapped {
            a: self.a,
            b: self.b,
        }]
    }

    fn revert(&mut self, grid: &mut Grid) -> Vec<Event> {
        grid.swap(self.a, self.b);
        self.stats.reverted = true;
        self.stage = Stage::Settle;
        vec![Event::NoMatch {
            a: self.a,
            b: self.b,
        }]
    }

    fn clear(&mut self, grid: &mut Grid, matches: &MatchSet) -> Vec<Event> {
        self.stats.chains += 1;
        let chain = self.stats.chains;
        let events = matches
            .iter()
            .filter_map(|pos| {
                let gem = grid.take(pos)?;
                Some(Event::Cleared { pos, gem, chain })
            })
            .collect::<Vec<_>>();
        self.stats.cleared += events.len();
        self.stage = Stage::Fall;
        events
    }

    fn fall(&mut self, grid: &mut Grid) -> Vec<Event> {
        if !self.policy.is_after_each_column() {
            let falls = apply_gravity(grid);
            self.stats.fell += falls.len();
            self.stage = Stage::Refill;
            return falls.into_iter().map(Event::Fell).collect();
        }

        let mut events = Vec::new();
        for x in 0..grid.width() {
            let falls = apply_column_gravity(grid, x);
            if falls.is_empty() {
                continue;
            }
            self.stats.fell += falls.len();
            events.extend(falls.into_iter().map(Event::Fell));

            let matches = find_matches(grid);
            if !matches.is_empty() {
                log::debug!("match after column {x} fell, holding back the columns to its right");
                self.stage = Stage::Clear(matches);
                return events;
            }
        }
        self.stage = Stage::Refill;
        events
    }

    fn refill<P>(&mut self, grid: &mut Grid, allocator: &mut TypeAllocator<P>) -> Vec<Event>
    where
        P: TypePicker,
    {
        let mut events = Vec::new();
        for pos in grid.positions() {
            if !grid.is_empty_at(pos) {
                continue;
            }
            let (gem, allocation) = allocator.fill(grid, pos, true);
            self.stats.filled += 1;
            if allocation.fallback {
                self.stats.fallbacks += 1;
            }
            events.push(Event::Filled {
                pos,
                gem,
                fallback: allocation.fallback,
            });

            if self.policy.is_after_each_gem() {
                let matches = find_matches(grid);
                if !matches.is_empty() {
                    log::debug!(
                        "match after filling {pos}, abandoning {} empty cell(s)",
                        grid.empty_count()
                    );
                    self.stage = Stage::Clear(matches);
                    return events;
                }
            }
        }

        let matches = find_matches(grid);
        self.stage = if matches.is_empty() {
            Stage::Settle
        } else {
            Stage::Clear(matches)
        };
        events
    }

    fn settle(&mut self) -> Vec<Event> {
        self.stage = Stage::Done;
        vec![Event::Settled {
            chains: self.stats.chains,
        }]
    }
}

/// Runs a complete cascade for swapping `a` and `b` and returns its events.
///
/// # Panics
///
/// Panics under the same conditions as [`Cascade::new`].
#[track_caller]
pub fn resolve<P>(
    grid: &mut Grid,
    allocator: &mut TypeAllocator<P>,
    a: Position,
    b: Position,
    policy: RecheckPolicy,
) -> (Vec<Event>, CascadeStats)
where
    P: TypePicker,
{
    let mut cascade = Cascade::new(grid, a, b, policy);
    let events = cascade.run(grid, allocator);
    (events, *cascade.stats())
}

#[cfg(test)]
mod tests {
    use gemcascade_core::GemType;
    use gemcascade_generator::{GemPalette, testing::CyclicPicker};

    use super::*;

    fn allocator(types: u8) -> TypeAllocator<CyclicPicker> {
        TypeAllocator::new(GemPalette::with_count(types).unwrap(), CyclicPicker::new())
    }

    fn kinds(
        cascade: &mut Cascade,
        grid: &mut Grid,
        allocator: &mut TypeAllocator<CyclicPicker>,
    ) -> Vec<StepKind> {
        std::iter::from_fn(|| cascade.advance(grid, allocator).map(|step| step.kind)).collect()
    }

    #[test]
    fn test_no_match_reverts() {
        let mut grid: Grid = "
            ABCA
            CABC
            AABC
        "
        .parse()
        .unwrap();
        let before = grid.clone();
        let mut allocator = allocator(3);
        let (a, b) = (Position::new(1, 0), Position::new(2, 0));
        let mut cascade = Cascade::new(&grid, a, b, RecheckPolicy::AfterRefill);

        assert!(cascade.phase().is_swapping());
        let swap = cascade.advance(&mut grid, &mut allocator).unwrap();
        assert_eq!(swap.events, [Event::Swapped { a, b }]);
        assert_eq!(grid.to_string(), "ABCA\nCABC\nABAC");
        assert_eq!(cascade.next_step(), Some(StepKind::Revert));

        let revert = cascade.advance(&mut grid, &mut allocator).unwrap();
        assert_eq!(revert.events, [Event::NoMatch { a, b }]);
        assert_eq!(grid, before);

        let settle = cascade.advance(&mut grid, &mut allocator).unwrap();
        assert_eq!(settle.events, [Event::Settled { chains: 0 }]);
        assert!(cascade.advance(&mut grid, &mut allocator).is_none());
        assert!(cascade.phase().is_idle());
        assert!(cascade.stats().reverted);
    }

    #[test]
    fn test_single_chain_phase_order() {
        let mut grid: Grid = "
            BCB
            CAC
            ABA
        "
        .parse()
        .unwrap();
        let mut allocator = allocator(3);
        let mut cascade = Cascade::new(
            &grid,
            Position::new(1, 0),
            Position::new(1, 1),
            RecheckPolicy::AfterRefill,
        );

        let kinds = kinds(&mut cascade, &mut grid, &mut allocator);
        assert_eq!(kinds[..4], [StepKind::Swap, StepKind::Clear, StepKind::Fall, StepKind::Refill]);
        assert_eq!(kinds.last(), Some(&StepKind::Settle));
        assert!(find_matches(&grid).is_empty());
        assert!(grid.is_full());

        let stats = cascade.stats();
        assert!(stats.chains >= 1);
        assert_eq!(stats.cleared, stats.filled);
        assert!(!stats.reverted);
    }

    #[test]
    fn test_clear_events_are_row_major_and_numbered() {
        let mut grid: Grid = "
            BCB
            CAC
            ABA
        "
        .parse()
        .unwrap();
        let mut allocator = allocator(3);
        let mut cascade = Cascade::new(
            &grid,
            Position::new(1, 0),
            Position::new(1, 1),
            RecheckPolicy::AfterRefill,
        );
        cascade.advance(&mut grid, &mut allocator);
        let clear = cascade.advance(&mut grid, &mut allocator).unwrap();

        let cleared = clear
            .events
            .iter()
            .map(|event| match event {
                Event::Cleared { pos, gem, chain } => {
                    assert_eq!(*chain, 1);
                    assert_eq!(gem.gem_type(), GemType::new(0));
                    *pos
                }
                other => panic!("unexpected event {other}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            cleared,
            [Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
        assert_eq!(grid.empty_count(), 3);
    }

    #[test]
    fn test_fall_step_reports_distances() {
        let mut grid: Grid = "
            BCB
            CAC
            ABA
        "
        .parse()
        .unwrap();
        let mut allocator = allocator(3);
        let mut cascade = Cascade::new(
            &grid,
            Position::new(1, 0),
            Position::new(1, 1),
            RecheckPolicy::AfterRefill,
        );
        cascade.advance(&mut grid, &mut allocator);
        cascade.advance(&mut grid, &mut allocator);
        let fall = cascade.advance(&mut grid, &mut allocator).unwrap();

        assert_eq!(fall.kind, StepKind::Fall);
        assert_eq!(fall.events.len(), 6);
        for event in &fall.events {
            let Event::Fell(fall) = event else {
                panic!("unexpected event {event}");
            };
            assert_eq!(fall.distance(), 1);
        }
        assert_eq!(grid.to_string(), "...\nBCB\nCBC");
    }

    /// Swapping (0, 2) and (1, 2) clears column 0; its remaining gems then
    /// fall three rows and complete `CCC` in the bottom row.
    fn falling_match_grid() -> Grid {
        "
        BCA
        CCB
        BAC
        AAB
        ACC
        "
        .parse()
        .unwrap()
    }

    fn first_refill(policy: RecheckPolicy) -> (CascadeStep, Cascade) {
        let mut grid = falling_match_grid();
        let mut allocator = allocator(3);
        let mut cascade = Cascade::new(&grid, Position::new(0, 2), Position::new(1, 2), policy);
        loop {
            let step = cascade.advance(&mut grid, &mut allocator).unwrap();
            if step.kind == StepKind::Refill {
                return (step, cascade);
            }
        }
    }

    #[test]
    fn test_after_refill_policy_fills_every_cell_first() {
        let (step, cascade) = first_refill(RecheckPolicy::AfterRefill);
        assert_eq!(step.events.len(), 3);
        assert_eq!(cascade.next_step(), Some(StepKind::Clear));
    }

    #[test]
    fn test_after_each_gem_policy_abandons_refill() {
        let (step, cascade) = first_refill(RecheckPolicy::AfterEachGem);
        assert_eq!(step.events.len(), 1);
        assert!(step.events[0].is_filled());
        assert_eq!(cascade.next_step(), Some(StepKind::Clear));
    }

    fn first_fall(grid: &mut Grid, policy: RecheckPolicy) -> (CascadeStep, Cascade) {
        let mut allocator = allocator(3);
        let mut cascade = Cascade::new(grid, Position::new(2, 0), Position::new(2, 1), policy);
        loop {
            let step = cascade.advance(grid, &mut allocator).unwrap();
            if step.kind == StepKind::Fall {
                return (step, cascade);
            }
        }
    }

    /// Swapping (2, 0) and (2, 1) completes `AAA` in row 1. Once column 0 has
    /// fallen it holds `CCC`, while columns 1 and 2 still have a gap.
    fn column_match_grid() -> Grid {
        "
        CBAB
        CABC
        AACB
        CBAA
        "
        .parse()
        .unwrap()
    }

    #[test]
    fn test_after_refill_policy_drops_every_column() {
        let mut grid = column_match_grid();
        let (step, cascade) = first_fall(&mut grid, RecheckPolicy::AfterRefill);
        assert_eq!(step.events.len(), 6);
        assert!(grid.is_empty_at(Position::new(1, 3)));
        assert_eq!(cascade.next_step(), Some(StepKind::Refill));
    }

    #[test]
    fn test_after_each_column_policy_stops_falling() {
        let mut grid = column_match_grid();
        let (step, mut cascade) = first_fall(&mut grid, RecheckPolicy::AfterEachColumn);
        assert_eq!(step.events.len(), 2);
        assert!(step.events.iter().all(|event| event.position().unwrap().x() == 0));
        assert!(grid.is_empty_at(Position::new(1, 1)));
        assert!(grid.is_empty_at(Position::new(2, 1)));
        assert_eq!(cascade.next_step(), Some(StepKind::Clear));

        let mut allocator = allocator(3);
        let clear = cascade.advance(&mut grid, &mut allocator).unwrap();
        let cleared = clear
            .events
            .iter()
            .map(|event| match event {
                Event::Cleared { pos, chain: 2, .. } => *pos,
                other => panic!("unexpected event {other}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            cleared,
            [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
    }

    #[test]
    fn test_after_each_column_policy_settles() {
        let mut grid = falling_match_grid();
        let mut allocator = allocator(3);
        let mut cascade = Cascade::new(
            &grid,
            Position::new(0, 2),
            Position::new(1, 2),
            RecheckPolicy::AfterEachColumn,
        );
        let kinds = kinds(&mut cascade, &mut grid, &mut allocator);
        assert_eq!(
            kinds[..5],
            [StepKind::Swap, StepKind::Clear, StepKind::Fall, StepKind::Clear, StepKind::Fall]
        );
        assert_eq!(kinds.last(), Some(&StepKind::Settle));

        let stats = cascade.stats();
        assert!(stats.chains >= 2);
        assert_eq!(stats.cleared, stats.filled);
        assert!(grid.is_full());
        assert!(find_matches(&grid).is_empty());
    }

    #[test]
    fn test_after_each_gem_policy_settles() {
        let mut grid = falling_match_grid();
        let mut allocator = allocator(3);
        let (events, stats) = resolve(
            &mut grid,
            &mut allocator,
            Position::new(0, 2),
            Position::new(1, 2),
            RecheckPolicy::AfterEachGem,
        );
        assert!(events.first().unwrap().is_swapped());
        assert_eq!(events.last(), Some(&Event::Settled { chains: stats.chains }));
        assert!(stats.chains >= 2);
        assert_eq!(stats.cleared, stats.filled);
        assert!(grid.is_full());
        assert!(find_matches(&grid).is_empty());
    }

    #[test]
    #[should_panic(expected = "not adjacent")]
    fn test_non_adjacent_swap_panics() {
        let grid: Grid = "ABC\nBCA".parse().unwrap();
        let _ = Cascade::new(
            &grid,
            Position::new(0, 0),
            Position::new(2, 0),
            RecheckPolicy::AfterRefill,
        );
    }

    #[test]
    #[should_panic(expected = "cell is empty")]
    fn test_empty_cell_swap_panics() {
        let grid: Grid = "A.C\nBCA".parse().unwrap();
        let _ = Cascade::new(
            &grid,
            Position::new(0, 1),
            Position::new(1, 1),
            RecheckPolicy::AfterRefill,
        );
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn test_out_of_bounds_swap_panics() {
        let grid: Grid = "ABC\nBCA".parse().unwrap();
        let _ = Cascade::new(
            &grid,
            Position::new(0, 0),
            Position::new(-1, 0),
            RecheckPolicy::AfterRefill,
        );
    }
}
