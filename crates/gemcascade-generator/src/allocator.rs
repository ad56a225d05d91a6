//! Gem type allocation for newly created gems.

use gemcascade_core::{Gem, GemType, Grid, Position, would_create_match};

use crate::{GemPalette, SeededPicker, TypePicker};

/// The result of a single [`TypeAllocator::choose_type`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// The chosen type.
    pub gem_type: GemType,
    /// `true` if no type satisfied the no-immediate-match constraint and the
    /// choice was made from the full palette instead.
    pub fallback: bool,
}

/// Chooses types for new gems, optionally avoiding immediate matches.
///
/// The allocator owns the [`GemPalette`] and an injected [`TypePicker`]. With
/// the constraint enabled, every palette type is tested against the six
/// three-cell windows through the target cell using only the gems already on
/// the board; the picker then chooses among the survivors. If none survive,
/// the allocator falls back to the whole palette rather than stalling the
/// fill. Fallbacks are logged and counted.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{GemType, Grid, Position};
/// use gemcascade_generator::{GemPalette, TypeAllocator, testing::CyclicPicker};
///
/// let grid: Grid = "AA.".parse()?;
/// let palette = GemPalette::with_count(2)?;
/// let mut allocator = TypeAllocator::new(palette, CyclicPicker::new());
///
/// let allocation = allocator.choose_type(&grid, Position::new(2, 0), true);
/// assert_eq!(allocation.gem_type, GemType::new(1));
/// assert!(!allocation.fallback);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct TypeAllocator<P = SeededPicker> {
    palette: GemPalette,
    picker: P,
    fallbacks: usize,
}

impl<P> TypeAllocator<P>
where
    P: TypePicker,
{
    /// Creates an allocator over `palette` drawing from `picker`.
    pub fn new(palette: GemPalette, picker: P) -> Self {
        Self {
            palette,
            picker,
            fallbacks: 0,
        }
    }

    /// Returns the palette types are chosen from.
    #[must_use]
    pub fn palette(&self) -> &GemPalette {
        &self.palette
    }

    /// Returns the picker.
    #[must_use]
    pub fn picker(&self) -> &P {
        &self.picker
    }

    /// Returns how many constrained allocations had to fall back to the full
    /// palette since the allocator was created.
    #[must_use]
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }

    /// Chooses a type for the gem about to be placed at `pos`.
    ///
    /// With `enforce_no_immediate_match` unset the choice is uniform over the
    /// palette. Otherwise only types for which [`would_create_match`] is
    /// `false` are considered, unless there are none.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn choose_type(
        &mut self,
        grid: &Grid,
        pos: Position,
        enforce_no_immediate_match: bool,
    ) -> Allocation {
        assert!(grid.is_valid(pos), "cannot allocate a type outside the grid at {pos}");

        if !enforce_no_immediate_match {
            return Allocation {
                gem_type: self.picker.pick(self.palette.types()),
                fallback: false,
            };
        }

        let candidates = self
            .palette
            .types()
            .iter()
            .copied()
            .filter(|&ty| !would_create_match(grid, pos, ty))
            .collect::<Vec<_>>();

        if candidates.is_empty() {
            self.fallbacks += 1;
            log::debug!(
                "no gem type avoids a match at {pos}, falling back to the full palette of {}",
                self.palette.len()
            );
            return Allocation {
                gem_type: self.picker.pick(self.palette.types()),
                fallback: true,
            };
        }

        Allocation {
            gem_type: self.picker.pick(&candidates),
            fallback: false,
        }
    }

    /// Chooses a type for the empty cell `pos` and spawns a gem there.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid or already occupied.
    pub fn fill(
        &mut self,
        grid: &mut Grid,
        pos: Position,
        enforce_no_immediate_match: bool,
    ) -> (Gem, Allocation) {
        let allocation = self.choose_type(grid, pos, enforce_no_immediate_match);
        let gem = grid.spawn(pos, allocation.gem_type);
        log::trace!("filled {pos} with {} ({})", gem.gem_type(), gem.id());
        (gem, allocation)
    }
}
