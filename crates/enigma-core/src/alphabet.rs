// Alphabet: ordered set of distinct symbols.
//
// Position `k` in the construction string is symbol index `k`. Every
// permutation and rotor indexes contacts through this mapping.

use std::fmt;

use hashbrown::HashMap;

use crate::CoreError;

/// Upper-case Latin letters, the alphabet of the historical machines.
pub const UPPER_LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Bijection between an ordered set of distinct symbols and `0..size`.
///
/// Immutable after construction. Share it with `Arc<Alphabet>` rather than
/// cloning it per rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    /// Symbols in index order.
    symbols: Vec<char>,
    /// Reverse lookup: symbol to its index.
    index_of: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from `chars`, one symbol per character.
    ///
    /// Fails with [`CoreError::DuplicateSymbol`] on the first repeated
    /// character and [`CoreError::EmptyAlphabet`] if `chars` is empty.
    pub fn new(chars: &str) -> Result<Self, CoreError> {
        let symbols: Vec<char> = chars.chars().collect();
        if symbols.is_empty() {
            return Err(CoreError::EmptyAlphabet);
        }

        let mut index_of = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if index_of.insert(c, i).is_some() {
                return Err(CoreError::DuplicateSymbol(c));
            }
        }

        Ok(Self { symbols, index_of })
    }

    /// Number of symbols.
    #[inline]
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if `symbol` belongs to this alphabet.
    #[inline]
    pub fn contains(&self, symbol: char) -> bool {
        self.index_of.contains_key(&symbol)
    }

    /// Symbol at `index`.
    pub fn to_symbol(&self, index: usize) -> Result<char, CoreError> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(CoreError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Index of `symbol`. Inverse of [`to_symbol`](Self::to_symbol).
    pub fn to_index(&self, symbol: char) -> Result<usize, CoreError> {
        self.index_of
            .get(&symbol)
            .copied()
            .ok_or(CoreError::UnknownSymbol(symbol))
    }

    /// Symbols in index order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = UPPER_LATIN.chars().collect();
        let index_of = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index_of }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
