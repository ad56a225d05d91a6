//! Benchmarks for board generation.
//!
//! # Benchmarks
//!
//! - **`generate_8x8`**: populates a standard 8x8 board from each fixed seed
//!   with the default five-type palette.
//! - **`generate_by_palette`**: populates a 16x16 board with palettes of three
//!   to seven types. Smaller palettes leave fewer candidates per cell.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use gemcascade_generator::{BoardGenerator, BoardSeed, GemPalette};

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

fn bench_generate_8x8(c: &mut Criterion) {
    let generator = BoardGenerator::new(8, 8, GemPalette::default());

    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = BoardSeed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new("generate_8x8", format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(seed),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_generate_by_palette(c: &mut Criterion) {
    let seed = BoardSeed::from_str(SEEDS[0]).unwrap();

    for types in 3..=7 {
        let generator = BoardGenerator::new(16, 16, GemPalette::with_count(types).unwrap());
        c.bench_with_input(
            BenchmarkId::new("generate_by_palette", format!("{types}_types")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(seed),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(8));
    targets =
        bench_generate_8x8,
        bench_generate_by_palette
);
criterion_main!(benches);
