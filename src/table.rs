//! Precomputed rotation tables (tabula recta).
//!
//! A [`RotationTable`] holds every distinct rotation of a base alphabet
//! reachable in increments of `step`. With `step == 1` this is the classical
//! Vigenère square: `lookup(plain, key)` gives the ciphertext symbol for a
//! plaintext symbol under a key symbol.

use crate::alphabet::{Alphabet, Symbol};
use crate::error::Result;
use crate::sequence;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationTable {
    base: Alphabet,
    step: i64,
    rows: Vec<Vec<Symbol>>,
}

impl RotationTable {
    pub fn new(base: Alphabet, step: i64) -> Result<Self> {
        let rows = sequence::rotations(base.symbols(), step)?;
        Ok(Self { base, step, rows })
    }

    /// Tabula recta over `base`
    pub fn square(base: Alphabet) -> Result<Self> {
        Self::new(base, 1)
    }

    /// Row `index`, wrapping around the number of rows.
    pub fn row(&self, index: usize) -> &[Symbol] {
        &self.rows[index % self.rows.len()]
    }

    /// Symbol in the row selected by `key` at the column of `plain`.
    pub fn lookup(&self, plain: Symbol, key: Symbol) -> Result<Symbol> {
        let row = self.base.index_of(key)?;
        let column = self.base.index_of(plain)?;
        Ok(self.row(row)[column])
    }

    pub fn base(&self) -> &Alphabet {
        &self.base
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Number of distinct rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
