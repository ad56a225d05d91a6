//! Fixed-board scenarios driven through taps.

use gemcascade_core::{GemType, Grid, Position, find_matches};
use gemcascade_game::{Event, Game, RecheckPolicy, StepKind};
use gemcascade_generator::{
    GemPalette,
    testing::{CyclicPicker, ScriptedPicker},
};

fn game(board: &str) -> Game<CyclicPicker> {
    Game::from_grid_with_palette(
        board.parse().unwrap(),
        GemPalette::with_count(3).unwrap(),
        CyclicPicker::new(),
        RecheckPolicy::AfterRefill,
    )
}

fn row(grid: &Grid, y: i32) -> String {
    (0..grid.width())
        .map(|x| {
            grid.gem_type_at(Position::new(x, y))
                .map_or('.', GemType::as_char)
        })
        .collect()
}

#[test]
fn swap_without_match_is_reverted() {
    let mut game = game(
        "
        ACBC
        CBCA
        BCAB
        AABC
        ",
    );
    let before = game.grid().clone();
    let (a, b) = (Position::new(1, 0), Position::new(2, 0));

    assert_eq!(game.tap(a), [Event::Selected(a)]);
    assert!(game.tap(b).is_empty());

    let swap = game.step().unwrap();
    assert_eq!(swap.kind, StepKind::Swap);
    assert_eq!(swap.events, [Event::Swapped { a, b }]);
    assert_eq!(row(game.grid(), 0), "ABAC");

    let revert = game.step().unwrap();
    assert_eq!(revert.events, [Event::NoMatch { a, b }]);
    assert_eq!(row(game.grid(), 0), "AABC");

    let settle = game.step().unwrap();
    assert_eq!(settle.events, [Event::Settled { chains: 0 }]);
    assert!(game.step().is_none());
    assert_eq!(game.grid(), &before);
    assert_eq!(game.selected(), None);
}

#[test]
fn swap_with_match_clears_falls_and_refills() {
    let mut game = game(
        "
        ABCA
        BCAB
        CABA
        ABAC
        ",
    );
    let (a, b) = (Position::new(1, 0), Position::new(1, 1));
    game.tap(a);
    game.tap(b);
    let events = game.finish();

    assert_eq!(events[0], Event::Swapped { a, b });

    let cleared = events
        .iter()
        .filter_map(|event| match event {
            Event::Cleared { pos, gem, chain } => Some((*pos, gem.gem_type(), *chain)),
            _ => None,
        })
        .collect::<Vec<_>>();
    let a_type = GemType::new(0);
    assert_eq!(
        cleared,
        [
            (Position::new(0, 0), a_type, 1),
            (Position::new(1, 0), a_type, 1),
            (Position::new(2, 0), a_type, 1),
        ]
    );
    assert!(events[1..4].iter().all(Event::is_cleared));

    // Columns 0-2 each drop three gems by one row.
    let falls = &events[4..13];
    assert!(falls.iter().all(Event::is_fell));
    for event in falls {
        let Event::Fell(fall) = event else {
            unreachable!();
        };
        assert_eq!(fall.distance(), 1);
    }

    let filled = events[13..16]
        .iter()
        .map(|event| match event {
            Event::Filled {
                pos,
                gem,
                fallback: false,
            } => (*pos, gem.gem_type().as_char()),
            other => panic!("unexpected event {other}"),
        })
        .collect::<Vec<_>>();
    assert_eq!(
        filled,
        [
            (Position::new(0, 3), 'A'),
            (Position::new(1, 3), 'B'),
            (Position::new(2, 3), 'C'),
        ]
    );

    assert_eq!(events[16..], [Event::Settled { chains: 1 }]);
    assert_eq!(game.grid().to_string(), "ABCA\nABCB\nBCAA\nCBBC");
    assert!(find_matches(game.grid()).is_empty());

    let stats = game.last_stats().unwrap();
    assert_eq!((stats.chains, stats.cleared, stats.fell, stats.filled), (1, 3, 9, 3));
}

#[test]
fn selection_round_trip_emits_events() {
    let mut game = game(
        "
        ACBC
        CBCA
        BCAB
        AABC
        ",
    );
    let first = Position::new(0, 0);
    let far = Position::new(3, 3);

    assert_eq!(game.tap(first), [Event::Selected(first)]);
    assert_eq!(game.tap(far), [Event::Deselected(first), Event::Selected(far)]);
    assert_eq!(game.tap(far), [Event::Deselected(far)]);
    assert!(game.tap(Position::new(4, 0)).is_empty());
    assert!(!game.is_busy());
}

#[test]
fn falling_gems_trigger_a_second_chain() {
    let mut game = Game::from_grid_with_palette(
        "
        BCA
        CCB
        BAC
        AAB
        ACC
        "
        .parse()
        .unwrap(),
        GemPalette::with_count(3).unwrap(),
        ScriptedPicker::from_letters("AABCAB"),
        RecheckPolicy::AfterRefill,
    );
    let events = game.resolve(Position::new(0, 2), Position::new(1, 2));

    let chains = events
        .iter()
        .filter_map(|event| match event {
            Event::Cleared { pos, chain, .. } => Some((*chain, *pos)),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(
        chains,
        [
            (1, Position::new(0, 0)),
            (1, Position::new(0, 1)),
            (1, Position::new(0, 2)),
            (2, Position::new(0, 0)),
            (2, Position::new(1, 0)),
            (2, Position::new(2, 0)),
        ]
    );
    assert_eq!(events.last(), Some(&Event::Settled { chains: 2 }));
    assert_eq!(game.grid().to_string(), "CAB\nBCA\nACB\nABC\nBAB");
    assert_eq!(game.allocator().picker().remaining(), 0);

    let stats = game.last_stats().unwrap();
    assert_eq!((stats.chains, stats.cleared, stats.fell, stats.filled), (2, 6, 14, 6));
}
