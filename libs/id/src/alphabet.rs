//! Validated symbol sets used for identifier generation.
//!
//! An alphabet is an ordered list of symbols (Unicode scalar values).
//! Its size is counted in symbols, not bytes.

use crate::GenerationError;

// =============================================================================
// Well-known alphabets
// =============================================================================

/// URL-friendly default alphabet: digits, upper case, `_`, lower case, `-`.
pub const DEFAULT_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz-";

/// Lower-case alphanumerics only, valid inside a DNS label or hostname.
pub const DNS_ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Largest alphabet a single random byte can address.
pub const MAX_ALPHABET_SIZE: usize = 255;

// =============================================================================
// Alphabet
// =============================================================================

/// An ordered, non-empty set of at most [`MAX_ALPHABET_SIZE`] symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet from its string form.
    ///
    /// Repeated symbols are kept, so a symbol listed twice is drawn twice as
    /// often as one listed once.
    pub fn new(raw: &str) -> Result<Self, GenerationError> {
        let symbols: Vec<char> = raw.chars().collect();

        if symbols.is_empty() {
            return Err(GenerationError::EmptyAlphabet);
        }

        if symbols.len() > MAX_ALPHABET_SIZE {
            return Err(GenerationError::AlphabetTooLarge {
                max: MAX_ALPHABET_SIZE,
                actual: symbols.len(),
            });
        }

        Ok(Self { symbols })
    }

    /// The 64-symbol default alphabet.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            symbols: DEFAULT_ALPHABET.chars().collect(),
        }
    }

    /// The 36-symbol DNS-safe alphabet.
    #[must_use]
    pub fn dns() -> Self {
        Self {
            symbols: DNS_ALPHABET.chars().collect(),
        }
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbol at `index`, if any.
    #[must_use]
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// Returns true if `c` is one of the symbols.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    /// Returns true if every symbol of `s` belongs to this alphabet.
    #[must_use]
    pub fn covers(&self, s: &str) -> bool {
        s.chars().all(|c| self.contains(c))
    }

    /// The symbols in order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Bit mask selecting the smallest power-of-two range that covers every index.
    pub(crate) fn mask(&self) -> u8 {
        // len <= 255, so next_power_of_two <= 256 and the result fits in a byte.
        (self.symbols.len().next_power_of_two() - 1) as u8
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.symbols {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Alphabet {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for Alphabet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Alphabet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
