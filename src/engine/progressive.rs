//! Progressive ("Alberti") rotation.
//!
//! The offset starts at `start_offset` and advances by `step` every
//! `interval` positions, so consecutive blocks of text are enciphered with
//! different rotations of the same alphabet.

use crate::alphabet::{Alphabet, Symbol};
use crate::error::{CipherError, Result};
use crate::sequence;
use crate::substitution::SubstitutionRule;

use super::{RotationSource, SubstitutionEngine, SymbolPolicy, wrapped_offset};

#[derive(Debug, Clone)]
pub struct ProgressiveRotationEngine {
    alphabet: Alphabet,
    start_offset: i64,
    step: i64,
    interval: usize,
    policy: SymbolPolicy,
}

impl ProgressiveRotationEngine {
    /// Advance one rotation per position, starting at `start_offset`.
    pub fn new(alphabet: Alphabet, start_offset: i64) -> Self {
        Self {
            alphabet,
            start_offset,
            step: 1,
            interval: 1,
            policy: SymbolPolicy::default(),
        }
    }

    /// Offset increment applied at each block boundary
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    /// Number of positions sharing one offset; must be at least 1.
    pub fn with_interval(mut self, interval: usize) -> Result<Self> {
        if interval == 0 {
            return Err(CipherError::invalid_parameter(
                "alberti_rot",
                "shift interval must be at least 1",
            ));
        }
        self.interval = interval;
        Ok(self)
    }

    pub fn with_policy(mut self, policy: SymbolPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn start_offset(&self) -> i64 {
        self.start_offset
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Number of positions after which the sequence of rules repeats, or
    /// `None` when that exceeds `usize::MAX`.
    pub fn period(&self) -> Option<usize> {
        sequence::cycle_length(self.alphabet.len(), self.step)
            .ok()?
            .checked_mul(self.interval)
    }
}

impl RotationSource for ProgressiveRotationEngine {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn offset_at(&self, position: usize) -> i64 {
        wrapped_offset(
            self.start_offset,
            self.step,
            position / self.interval,
            self.alphabet.len(),
        )
    }
}

impl SubstitutionEngine for ProgressiveRotationEngine {
    fn kind(&self) -> &str {
        "alberti_rot"
    }

    fn substitution_for(&self, position: usize) -> SubstitutionRule {
        self.rotation_rule(position)
    }

    fn policy(&self) -> SymbolPolicy {
        self.policy
    }

    fn apply(&self, symbol: Symbol, position: usize) -> Result<Symbol> {
        match self.rotate_symbol(symbol, position) {
            Some(output) => Ok(output),
            None => self.policy.unmapped(symbol, position),
        }
    }

    fn apply_inverse(&self, symbol: Symbol, position: usize) -> Result<Symbol> {
        match self.unrotate_symbol(symbol, position) {
            Some(output) => Ok(output),
            None => self.policy.unmapped(symbol, position),
        }
    }
}
