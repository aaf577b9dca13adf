//! Immutable cipher alphabets.
//!
//! An [`Alphabet`] is an ordered, duplicate-free list of symbols. Order is
//! significant: it defines both rotation and the position of each symbol.
//! Alphabets never change after construction; every transform returns a new
//! value, and all reordering goes through [`crate::sequence`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{CipherError, Result};
use crate::sequence;
use crate::substitution::SubstitutionRule;

/// Atomic unit of an alphabet
pub type Symbol = char;

/// The 26-letter uppercase Latin alphabet
pub const LATIN_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Ordered, duplicate-free, immutable sequence of symbols.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
    positions: HashMap<Symbol, usize>,
}

impl Alphabet {
    /// Build an alphabet from an ordered sequence of symbols.
    ///
    /// Fails with [`CipherError::InvalidSequence`] on empty input or
    /// duplicate symbols.
    pub fn from_sequence(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self> {
        let symbols = sequence::validate(symbols.into_iter().collect())?;
        Ok(Self::indexed(symbols))
    }

    /// Uppercase A-Z
    pub fn latin() -> Self {
        Self::indexed(LATIN_UPPERCASE.chars().collect())
    }

    /// Build an alphabet from inclusive code-point ranges followed by extra
    /// code points, e.g. `[(0x41, 0x5A)]` for A-Z.
    pub fn from_unicode_ranges(ranges: &[(u32, u32)], extras: &[u32]) -> Result<Self> {
        let code_points = ranges
            .iter()
            .flat_map(|&(start, end)| start..=end)
            .chain(extras.iter().copied());

        let mut symbols = Vec::new();
        for code in code_points {
            let symbol = char::from_u32(code).ok_or_else(|| {
                CipherError::invalid_sequence(format!("U+{:04X} is not a valid character", code))
            })?;
            symbols.push(symbol);
        }

        Self::from_sequence(symbols)
    }

    /// Keyword-mixed alphabet: the keyword's distinct symbols first, then the
    /// remaining symbols in their current order.
    ///
    /// Every keyword symbol must belong to the alphabet.
    pub fn keyed(&self, keyword: &str) -> Result<Self> {
        let keyword: Vec<Symbol> = keyword.chars().collect();
        let mixed = sequence::move_to_front(&self.symbols, &keyword)?;
        Self::from_sequence(mixed)
    }

    /// New alphabet whose symbol `i` is this alphabet's symbol
    /// `(i + offset) mod len`.
    pub fn rotated(&self, offset: i64) -> Self {
        let shift = self.normalize(offset);
        Self::indexed(sequence::rotate_normalized(&self.symbols, shift))
    }

    /// Bijection mapping each symbol to the symbol at the same position of
    /// the alphabet rotated by `offset`.
    pub fn substitution_map(&self, offset: i64) -> SubstitutionRule {
        let rotated = self.rotated(offset);
        self.symbols
            .iter()
            .copied()
            .zip(rotated.symbols.iter().copied())
            .collect()
    }

    /// Single-symbol form of [`Alphabet::substitution_map`]; `None` when the
    /// symbol is foreign to the alphabet.
    pub fn shift(&self, symbol: Symbol, offset: i64) -> Option<Symbol> {
        let index = *self.positions.get(&symbol)?;
        let target = (index + self.normalize(offset)) % self.symbols.len();
        Some(self.symbols[target])
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.positions.contains_key(&symbol)
    }

    /// Position of `symbol`, failing with [`CipherError::ElementNotFound`]
    /// when it is not part of the alphabet.
    pub fn index_of(&self, symbol: Symbol) -> Result<usize> {
        match self.positions.get(&symbol) {
            Some(&index) => Ok(index),
            None => sequence::index_of(&self.symbols, &symbol),
        }
    }

    /// Symbol at `index`, if in range
    pub fn symbol_at(&self, index: usize) -> Option<Symbol> {
        self.symbols.get(index).copied()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; alphabets hold at least one symbol.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols must already be known unique.
    fn indexed(symbols: Vec<Symbol>) -> Self {
        let positions = symbols
            .iter()
            .enumerate()
            .map(|(index, &symbol)| (symbol, index))
            .collect();
        Self { symbols, positions }
    }

    fn normalize(&self, offset: i64) -> usize {
        (offset as i128).rem_euclid(self.symbols.len() as i128) as usize
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl FromStr for Alphabet {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_sequence(s.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sequence_rejects_duplicates() {
        assert!(matches!(
            "ABCA".parse::<Alphabet>(),
            Err(CipherError::InvalidSequence { .. })
        ));
        assert!(matches!(
            "".parse::<Alphabet>(),
            Err(CipherError::InvalidSequence { .. })
        ));
    }

    #[test]
    fn test_latin_matches_parsed() {
        let parsed: Alphabet = LATIN_UPPERCASE.parse().unwrap();
        assert_eq!(Alphabet::latin(), parsed);
        assert_eq!(parsed.len(), 26);
        assert_eq!(parsed.to_string(), LATIN_UPPERCASE);
    }

    #[test]
    fn test_rotated_returns_new_alphabet() {
        let abc: Alphabet = "ABCDE".parse().unwrap();
        let rotated = abc.rotated(2);
        assert_eq!(rotated.to_string(), "CDEAB");
        assert_eq!(abc.to_string(), "ABCDE");
        assert_eq!(rotated.index_of('C').unwrap(), 0);
        assert_eq!(rotated.rotated(-2), abc);
    }

    #[test]
    fn test_substitution_map_caesar() {
        let latin = Alphabet::latin();
        let rule = latin.substitution_map(3);
        assert_eq!(rule.get('A'), Some('D'));
        assert_eq!(rule.get('X'), Some('A'));
        assert_eq!(rule.len(), 26);
        assert!(rule.is_bijective());
    }

    #[test]
    fn test_shift_agrees_with_map() {
        let latin = Alphabet::latin();
        for offset in [-27, -1, 0, 5, 25, 52] {
            let rule = latin.substitution_map(offset);
            for &symbol in latin.symbols() {
                assert_eq!(latin.shift(symbol, offset), rule.get(symbol));
            }
        }
        assert_eq!(latin.shift('a', 1), None);
    }

    #[test]
    fn test_index_of_foreign_symbol() {
        let latin = Alphabet::latin();
        assert_eq!(latin.index_of('K').unwrap(), 10);
        assert!(latin.contains('K'));
        assert!(!latin.contains('k'));
        assert!(matches!(
            latin.index_of('k'),
            Err(CipherError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn test_from_unicode_ranges() {
        let alphabet = Alphabet::from_unicode_ranges(&[(0x41, 0x43), (0x30, 0x31)], &[0x20]).unwrap();
        assert_eq!(alphabet.to_string(), "ABC01 ");

        assert!(Alphabet::from_unicode_ranges(&[(0x41, 0x42)], &[0x41]).is_err());
        assert!(Alphabet::from_unicode_ranges(&[(0xD800, 0xD800)], &[]).is_err());
    }

    #[test]
    fn test_keyed_alphabet() {
        let keyed = Alphabet::latin().keyed("KRYPTOS").unwrap();
        assert_eq!(keyed.to_string(), "KRYPTOSABCDEFGHIJLMNQUVWXZ");

        let repeated = Alphabet::latin().keyed("BALLOON").unwrap();
        assert!(repeated.to_string().starts_with("BALON"));

        assert!(Alphabet::latin().keyed("key").is_err());
    }
}
