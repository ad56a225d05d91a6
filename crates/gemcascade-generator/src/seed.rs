use std::{fmt, str::FromStr};

/// A 256-bit seed that makes a board and its refills reproducible.
///
/// Seeds print and parse as 64 lowercase hexadecimal digits.
///
/// # Examples
///
/// ```
/// use gemcascade_generator::BoardSeed;
///
/// let seed: BoardSeed = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff".parse()?;
/// assert_eq!(seed.to_string().len(), 64);
/// assert_eq!(seed.as_bytes()[1], 0x11);
/// # Ok::<(), gemcascade_generator::SeedParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSeed([u8; 32]);

/// An error returned when parsing a [`BoardSeed`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    /// The input is not exactly 64 characters long.
    #[display("seed must be 64 hexadecimal digits, got {found}")]
    InvalidLength {
        /// Number of characters found.
        found: usize,
    },
    /// A character is not a hexadecimal digit.
    #[display("invalid hexadecimal digit {found:?} at index {index}")]
    InvalidDigit {
        /// Character index of the offending digit.
        index: usize,
        /// The offending character.
        found: char,
    },
}

impl BoardSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for BoardSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for BoardSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = s.trim().chars().collect::<Vec<_>>();
        if chars.len() != 64 {
            return Err(SeedParseError::InvalidLength { found: chars.len() });
        }

        let mut bytes = [0; 32];
        for (i, (byte, pair)) in bytes.iter_mut().zip(chars.chunks_exact(2)).enumerate() {
            let digit = |offset: usize| {
                let found = pair[offset];
                found
                    .to_digit(16)
                    .and_then(|d| u8::try_from(d).ok())
                    .ok_or(SeedParseError::InvalidDigit {
                        index: i * 2 + offset,
                        found,
                    })
            };
            *byte = (digit(0)? << 4) | digit(1)?;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parse_roundtrip() {
        let seed = BoardSeed::from_bytes(std::array::from_fn(|i| u8::try_from(i * 7).unwrap()));
        let text = seed.to_string();
        assert_eq!(&text[..6], "00070e");
        assert_eq!(text.parse::<BoardSeed>(), Ok(seed));
    }

    #[test]
    fn test_uppercase_is_accepted() {
        let upper = "AB".repeat(32);
        let seed: BoardSeed = upper.parse().unwrap();
        assert_eq!(seed.as_bytes(), &[0xab; 32]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<BoardSeed>(),
            Err(SeedParseError::InvalidLength { found: 3 })
        );
        let mut text = "0".repeat(64);
        text.replace_range(9..10, "g");
        assert_eq!(
            text.parse::<BoardSeed>(),
            Err(SeedParseError::InvalidDigit {
                index: 9,
                found: 'g'
            })
        );
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(BoardSeed::random(), BoardSeed::random());
    }
}
