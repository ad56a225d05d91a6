//! Gem and gem type representation.

use std::fmt::{self, Display};

/// A gem type identifier.
///
/// Gem types are opaque to matching: two gems match exactly when their types
/// are equal. Types are numbered from `0` and displayed as uppercase letters
/// (`0` is `A`, `1` is `B`, ...), which is also the board text format.
///
/// # Examples
///
/// ```
/// use gemcascade_core::GemType;
///
/// let ty = GemType::new(2);
/// assert_eq!(ty.to_string(), "C");
/// assert_eq!(GemType::from_char('C'), Some(ty));
/// assert_eq!(GemType::from_char('?'), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GemType(u8);

impl GemType {
    /// Maximum number of distinct gem types.
    pub const MAX: u8 = 26;

    /// Creates a gem type from its index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`GemType::MAX`].
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < Self::MAX, "gem type index out of range");
        Self(index)
    }

    /// Returns the index of this gem type.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the letter used for this type in the board text format.
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'A' + self.0) as char
    }

    /// Parses a gem type from its letter (`A`-`Z`).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.is_ascii_uppercase()
            .then(|| Self(u8::try_from(c).unwrap_or_default() - b'A'))
    }
}

impl Display for GemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Identity of a gem, unique within one [`Grid`].
///
/// Identities are handed out in spawn order and never reused, so a gem can be
/// followed across swaps and falls.
///
/// [`Grid`]: crate::Grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GemId(u32);

impl GemId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw identity value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for GemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A gem placed on the board.
///
/// The type never changes after creation. The highlight flag only mirrors the
/// current selection for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gem {
    id: GemId,
    gem_type: GemType,
    highlighted: bool,
}

impl Gem {
    pub(crate) const fn new(id: GemId, gem_type: GemType) -> Self {
        Self {
            id,
            gem_type,
            highlighted: false,
        }
    }

    /// Returns the identity of this gem.
    #[must_use]
    #[inline]
    pub const fn id(&self) -> GemId {
        self.id
    }

    /// Returns the type of this gem.
    #[must_use]
    #[inline]
    pub const fn gem_type(&self) -> GemType {
        self.gem_type
    }

    /// Returns `true` if the gem is highlighted as the current selection.
    #[must_use]
    pub const fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Sets the selection highlight.
    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }
}
