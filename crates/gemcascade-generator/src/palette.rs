use gemcascade_core::GemType;

/// The configured set of gem types a board draws from.
///
/// A palette always holds at least one type and never holds a type twice.
/// Three types are the minimum for a board that can be filled without
/// immediate matches; five or more keep fallbacks rare.
///
/// # Examples
///
/// ```
/// use gemcascade_core::GemType;
/// use gemcascade_generator::GemPalette;
///
/// let palette = GemPalette::with_count(5)?;
/// assert_eq!(palette.len(), 5);
/// assert_eq!(palette.types()[4], GemType::new(4));
/// # Ok::<(), gemcascade_generator::PaletteError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemPalette {
    types: Vec<GemType>,
}

/// Number of gem types in the default palette.
pub const DEFAULT_GEM_TYPES: u8 = 5;

impl Default for GemPalette {
    fn default() -> Self {
        Self {
            types: (0..DEFAULT_GEM_TYPES).map(GemType::new).collect(),
        }
    }
}

/// An error returned when building a [`GemPalette`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PaletteError {
    /// The palette would contain no types.
    #[display("gem palette must contain at least one type")]
    Empty,
    /// More types were requested than can be represented.
    #[display("gem palette supports at most {} types, got {count}", GemType::MAX)]
    TooMany {
        /// The requested number of types.
        count: usize,
    },
    /// The same type was listed twice.
    #[display("gem type {_0} listed more than once")]
    Duplicate(#[error(not(source))] GemType),
}

impl GemPalette {
    /// Creates a palette from an explicit list of types, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Empty`] for an empty list and
    /// [`PaletteError::Duplicate`] if a type repeats.
    pub fn new<I>(types: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = GemType>,
    {
        let mut collected = Vec::new();
        for ty in types {
            if collected.contains(&ty) {
                return Err(PaletteError::Duplicate(ty));
            }
            collected.push(ty);
        }
        if collected.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { types: collected })
    }

    /// Creates a palette of the first `count` types (`A`, `B`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Empty`] if `count` is zero and
    /// [`PaletteError::TooMany`] if it exceeds [`GemType::MAX`].
    pub fn with_count(count: u8) -> Result<Self, PaletteError> {
        if count > GemType::MAX {
            return Err(PaletteError::TooMany {
                count: usize::from(count),
            });
        }
        Self::new((0..count).map(GemType::new))
    }

    /// Returns the types in palette order.
    #[must_use]
    pub fn types(&self) -> &[GemType] {
        &self.types
    }

    /// Returns the number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always `false`: a palette is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns `true` if `gem_type` belongs to the palette.
    #[must_use]
    pub fn contains(&self, gem_type: GemType) -> bool {
        self.types.contains(&gem_type)
    }
}
