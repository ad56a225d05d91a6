//! Headless text driver for the gemcascade engine.
//!
//! Reads commands from standard input, one per line, feeds taps and swaps to
//! a [`Game`] and prints the resulting events and the board. Type `help` for
//! the command summary.
//!
//! ```sh
//! echo "3 3
//! 4 3" | gemcascade --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
//! ```
//!
//! Set `RUST_LOG=debug` to see phase transitions and fill fallbacks.

use std::{
    io::{self, BufRead as _, Write},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use gemcascade_core::{Grid, Position, WorldPoint};
use gemcascade_game::{ConfigError, Event, Game, GameConfig, RecheckPolicy};
use gemcascade_generator::BoardSeed;

use crate::command::{Command, HELP};

mod command;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Recheck {
    /// Check for new matches once after every full refill.
    AfterRefill,
    /// Check for new matches after every refilled gem.
    AfterEachGem,
    /// Check for new matches after every column that fell.
    AfterEachColumn,
}

impl From<Recheck> for RecheckPolicy {
    fn from(recheck: Recheck) -> Self {
        match recheck {
            Recheck::AfterRefill => Self::AfterRefill,
            Recheck::AfterEachGem => Self::AfterEachGem,
            Recheck::AfterEachColumn => Self::AfterEachColumn,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board width.
    #[arg(long, default_value_t = 8)]
    width: u16,

    /// Board height.
    #[arg(long, default_value_t = 8)]
    height: u16,

    /// Number of gem types.
    #[arg(short = 't', long, value_name = "COUNT", default_value_t = 5)]
    gem_types: u8,

    /// World-space edge length of a cell.
    #[arg(long, default_value_t = 1.0)]
    cell_size: f32,

    /// World-space origin of cell (0, 0) as `X,Y,Z`.
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_point, default_value = "0,0,0")]
    origin: WorldPoint,

    /// Seed for the board and refills (64 hex digits).
    #[arg(long, value_name = "HEX")]
    seed: Option<BoardSeed>,

    /// When to look for new matches after a clear.
    #[arg(long, value_enum, default_value = "after-refill")]
    recheck: Recheck,

    /// Print each cascade phase separately.
    #[arg(long)]
    steps: bool,

    /// Print the world-space center next to each event.
    #[arg(long)]
    world: bool,

    /// Do not dump the board to the debug log after each cascade.
    #[arg(long)]
    no_debug: bool,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            origin: self.origin,
            gem_types: self.gem_types,
            debug: !self.no_debug,
            recheck: self.recheck.into(),
            seed: self.seed,
        }
    }
}

fn parse_point(s: &str) -> Result<WorldPoint, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<f32>().map_err(|e| format!("{part:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [x, y] => Ok(WorldPoint::new(x, y, 0.0)),
        [x, y, z] => Ok(WorldPoint::new(x, y, z)),
        _ => Err(format!("expected X,Y or X,Y,Z, got {s:?}")),
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum CliError {
    #[display("invalid configuration: {_0}")]
    Config(ConfigError),
    #[display("I/O error: {_0}")]
    Io(io::Error),
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut game = Game::new(&args.config())?;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    if let Some(seed) = game.seed() {
        writeln!(out, "seed {seed}")?;
    }
    writeln!(out, "recheck {}", game.recheck())?;
    if args.world {
        let layout = game.grid().layout();
        let origin = layout.origin();
        writeln!(
            out,
            "cell size {:.2}, origin ({:.2}, {:.2}, {:.2})",
            layout.cell_size(),
            origin.x,
            origin.y,
            origin.z
        )?;
    }
    print_board(&mut out, game.grid())?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err} (type `help` for commands)")?;
                continue;
            }
        };

        match command {
            Command::Tap(pos) => {
                let events = game.tap(pos);
                if events.is_empty() && !game.is_busy() {
                    writeln!(out, "tap on {pos} ignored")?;
                }
                print_events(&mut out, &game, &events, args.world)?;
                if game.is_busy() {
                    drive_cascade(&mut out, &mut game, args)?;
                }
            }
            Command::Swap(a, b) => {
                if let Some(reason) = swap_rejection(game.grid(), a, b) {
                    writeln!(out, "cannot swap {a} and {b}: {reason}")?;
                    continue;
                }
                let events = game.resolve(a, b);
                print_events(&mut out, &game, &events, args.world)?;
                print_board(&mut out, game.grid())?;
            }
            Command::Show => print_board(&mut out, game.grid())?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    Ok(())
}

fn drive_cascade<W>(out: &mut W, game: &mut Game, args: &Args) -> io::Result<()>
where
    W: Write,
{
    if args.steps {
        while let Some(step) = game.step() {
            writeln!(out, "[{} / {}]", step.kind, game.phase())?;
            print_events(out, game, &step.events, args.world)?;
            if let Some(stats) = game.cascade_stats() {
                writeln!(
                    out,
                    "  so far: chain {}, cleared {}, fell {}, filled {}",
                    stats.chains, stats.cleared, stats.fell, stats.filled
                )?;
            }
        }
    } else {
        let events = game.finish();
        print_events(out, game, &events, args.world)?;
    }
    if let Some(stats) = game.last_stats() {
        writeln!(
            out,
            "chains {}, cleared {}, fell {}, filled {}, fallbacks {}",
            stats.chains, stats.cleared, stats.fell, stats.filled, stats.fallbacks
        )?;
    }
    print_board(out, game.grid())
}

fn swap_rejection(grid: &Grid, a: Position, b: Position) -> Option<&'static str> {
    if !grid.is_valid(a) || !grid.is_valid(b) {
        Some("outside the board")
    } else if grid.is_empty_at(a) || grid.is_empty_at(b) {
        Some("empty cell")
    } else if !a.is_adjacent(b) {
        Some("not adjacent")
    } else {
        None
    }
}

fn print_events<W>(out: &mut W, game: &Game, events: &[Event], world: bool) -> io::Result<()>
where
    W: Write,
{
    for event in events {
        match event.position().filter(|_| world) {
            Some(pos) => {
                let center = game.grid().world_center(pos);
                writeln!(
                    out,
                    "  {event} @ ({:.2}, {:.2}, {:.2})",
                    center.x, center.y, center.z
                )?;
            }
            None => writeln!(out, "  {event}")?,
        }
    }
    Ok(())
}

fn print_board<W>(out: &mut W, grid: &Grid) -> io::Result<()>
where
    W: Write,
{
    for (line, y) in grid.to_string().lines().zip((0..grid.height()).rev()) {
        writeln!(out, "{y:>3} {line}")?;
    }
    let columns = (0..grid.width())
        .map(|x| char::from_digit(u32::try_from(x % 10).unwrap_or_default(), 10).unwrap_or('?'))
        .collect::<String>();
    writeln!(out, "    {columns}")
}
