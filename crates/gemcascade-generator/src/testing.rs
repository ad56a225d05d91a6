//! Deterministic pickers for tests and reproducible scenarios.
//!
//! Both pickers implement [`TypePicker`] without any randomness, so the
//! outcome of a fill or a cascade depends only on the board and the order of
//! allocation requests.

use std::collections::VecDeque;

use gemcascade_core::GemType;

use crate::TypePicker;

/// Picks candidates in rotation: the `n`-th call returns
/// `candidates[n % candidates.len()]`.
///
/// # Examples
///
/// ```
/// use gemcascade_core::GemType;
/// use gemcascade_generator::{TypePicker, testing::CyclicPicker};
///
/// let types = [GemType::new(0), GemType::new(1), GemType::new(2)];
/// let mut picker = CyclicPicker::new();
/// let picks = (0..4).map(|_| picker.pick(&types)).collect::<Vec<_>>();
/// assert_eq!(picks, [types[0], types[1], types[2], types[0]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CyclicPicker {
    calls: usize,
}

impl CyclicPicker {
    /// Creates a picker starting at the first candidate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of picks made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl TypePicker for CyclicPicker {
    fn pick(&mut self, candidates: &[GemType]) -> GemType {
        assert!(!candidates.is_empty(), "no candidate gem types to pick from");
        let gem_type = candidates[self.calls % candidates.len()];
        self.calls += 1;
        gem_type
    }
}

/// Replays a fixed script of preferred types.
///
/// Each pick consumes the next scripted type and returns it if it is among
/// the candidates; otherwise, and once the script is exhausted, the first
/// candidate is returned.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    script: VecDeque<GemType>,
}

impl ScriptedPicker {
    /// Creates a picker that replays `script` in order.
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = GemType>,
    {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Creates a picker from a string of type letters, e.g. `"ABCA"`.
    ///
    /// # Panics
    ///
    /// Panics if `letters` contains a character that is not `A`-`Z`.
    #[track_caller]
    #[must_use]
    pub fn from_letters(letters: &str) -> Self {
        Self::new(letters.chars().map(|c| {
            GemType::from_char(c).unwrap_or_else(|| panic!("invalid gem type letter {c:?}"))
        }))
    }

    /// Returns the number of scripted types not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl TypePicker for ScriptedPicker {
    fn pick(&mut self, candidates: &[GemType]) -> GemType {
        assert!(!candidates.is_empty(), "no candidate gem types to pick from");
        match self.script.pop_front() {
            Some(preferred) if candidates.contains(&preferred) => preferred,
            _ => candidates[0],
        }
    }
}
