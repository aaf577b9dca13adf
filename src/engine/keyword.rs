//! Keyword-driven ("Vigenère") rotation.

use crate::alphabet::{Alphabet, Symbol};
use crate::error::Result;
use crate::sequence;
use crate::substitution::SubstitutionRule;

use super::{RotationSource, SubstitutionEngine, SymbolPolicy};

/// Offset at position `p` is the alphabet index of
/// `keyword[p mod keyword.len()]`.
///
/// The keyword is validated once at construction: it must be non-empty,
/// free of repeated symbols, and drawn entirely from the alphabet.
///
/// ```
/// use cipherchain::alphabet::Alphabet;
/// use cipherchain::engine::KeywordRotationEngine;
/// use cipherchain::pipeline::CipherPipeline;
///
/// let engine = KeywordRotationEngine::new(Alphabet::latin(), "KEY").unwrap();
/// let pipeline = CipherPipeline::builder().engine(engine).build().unwrap();
/// assert_eq!(pipeline.run("HELLO", 0).unwrap(), "RIJVS");
/// ```
#[derive(Debug, Clone)]
pub struct KeywordRotationEngine {
    alphabet: Alphabet,
    keyword: Vec<Symbol>,
    shifts: Vec<i64>,
    policy: SymbolPolicy,
}

impl KeywordRotationEngine {
    pub fn new(alphabet: Alphabet, keyword: &str) -> Result<Self> {
        let keyword = sequence::validate(keyword.chars().collect())?;
        let shifts = keyword
            .iter()
            .map(|&symbol| alphabet.index_of(symbol).map(|index| index as i64))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            alphabet,
            keyword,
            shifts,
            policy: SymbolPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: SymbolPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn keyword(&self) -> String {
        self.keyword.iter().collect()
    }
}

impl RotationSource for KeywordRotationEngine {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn offset_at(&self, position: usize) -> i64 {
        self.shifts[position % self.shifts.len()]
    }
}

impl SubstitutionEngine for KeywordRotationEngine {
    fn kind(&self) -> &str {
        "vigenere_rot"
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
