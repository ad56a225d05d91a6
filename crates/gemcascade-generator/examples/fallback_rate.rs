//! Measures how often board generation needs the full-palette fallback.
//!
//! For every palette size in the requested range, a batch of boards is
//! generated in parallel from random seeds. The report lists the mean number
//! of fallbacks per board and the share of boards that start with a match.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example fallback_rate
//! ```
//!
//! Sample two-type palettes on a larger board:
//!
//! ```sh
//! cargo run --example fallback_rate -- --min-types 2 --max-types 2 --width 12 --height 12
//! ```
//!
//! Print a single board for a known seed:
//!
//! ```sh
//! cargo run --example fallback_rate -- --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
//! ```

use std::process;

use clap::Parser;
use gemcascade_core::find_matches;
use gemcascade_generator::{BoardGenerator, BoardSeed, GemPalette};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board width.
    #[arg(long, default_value_t = 8)]
    width: u16,

    /// Board height.
    #[arg(long, default_value_t = 8)]
    height: u16,

    /// Smallest palette size to sample.
    #[arg(long, value_name = "COUNT", default_value_t = 2)]
    min_types: u8,

    /// Largest palette size to sample.
    #[arg(long, value_name = "COUNT", default_value_t = 6)]
    max_types: u8,

    /// Boards generated per palette size.
    #[arg(long, value_name = "COUNT", default_value_t = 10_000)]
    boards: usize,

    /// Print the board generated from this seed with `--max-types` types instead.
    #[arg(long, value_name = "HEX")]
    seed: Option<BoardSeed>,
}

fn main() {
    let args = Args::parse();
    if args.width == 0 || args.height == 0 {
        eprintln!("--width and --height must be at least 1.");
        process::exit(1);
    }
    if args.min_types > args.max_types {
        eprintln!("--min-types must not exceed --max-types.");
        process::exit(1);
    }

    if let Some(seed) = args.seed {
        let generator = BoardGenerator::new(args.width, args.height, palette(args.max_types));
        let board = generator.generate_with_seed(seed);
        println!("Seed:");
        println!("  {}", board.seed);
        println!();
        println!("Board:");
        for line in board.grid.to_string().lines() {
            println!("  {line}");
        }
        println!();
        println!("Fallbacks: {}", board.fallbacks);
        return;
    }

    if args.boards == 0 {
        eprintln!("--boards must be at least 1.");
        process::exit(1);
    }

    println!("types  fallbacks/board  boards with a match");
    for types in args.min_types..=args.max_types {
        let generator = BoardGenerator::new(args.width, args.height, palette(types));
        let (fallbacks, matched) = (0..args.boards)
            .into_par_iter()
            .map(|_| {
                let board = generator.generate();
                let matched = !find_matches(&board.grid).is_empty();
                (board.fallbacks, usize::from(matched))
            })
            .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

        #[expect(clippy::cast_precision_loss)]
        let (per_board, share) = (
            fallbacks as f64 / args.boards as f64,
            matched as f64 / args.boards as f64 * 100.0,
        );
        println!("{types:>5}  {per_board:>15.3}  {share:>18.2}%");
    }
}

fn palette(types: u8) -> GemPalette {
    match GemPalette::with_count(types) {
        Ok(palette) => palette,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    }
}
