use gemcascade_core::GemType;
use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64;

use crate::BoardSeed;

/// The source of randomness for type allocation.
///
/// The allocator narrows the palette down to the acceptable candidates and
/// asks the picker to choose one. Tests substitute deterministic pickers from
/// [`testing`](crate::testing).
pub trait TypePicker {
    /// Chooses one type from `candidates`.
    ///
    /// `candidates` is never empty. Implementations must return one of its
    /// elements.
    fn pick(&mut self, candidates: &[GemType]) -> GemType;
}

impl<P> TypePicker for &mut P
where
    P: TypePicker + ?Sized,
{
    fn pick(&mut self, candidates: &[GemType]) -> GemType {
        (**self).pick(candidates)
    }
}

/// A uniformly random picker driven by a seeded PCG generator.
#[derive(Debug, Clone)]
pub struct SeededPicker {
    seed: BoardSeed,
    rng: Pcg64,
}

impl SeededPicker {
    /// Creates a picker whose choices are fully determined by `seed`.
    #[must_use]
    pub fn new(seed: BoardSeed) -> Self {
        Self {
            seed,
            rng: Pcg64::from_seed(*seed.as_bytes()),
        }
    }

    /// Returns the seed the picker started from.
    #[must_use]
    pub fn seed(&self) -> BoardSeed {
        self.seed
    }
}

impl TypePicker for SeededPicker {
    fn pick(&mut self, candidates: &[GemType]) -> GemType {
        *candidates
            .choose(&mut self.rng)
            .expect("no candidate gem types to pick from")
    }
}
