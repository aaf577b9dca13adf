//! Fixed-offset rotation (Caesar, ROT13 and friends).

use crate::alphabet::{Alphabet, Symbol};
use crate::error::Result;
use crate::substitution::SubstitutionRule;

use super::{RotationSource, SubstitutionEngine, SymbolPolicy};

/// Every position maps through the same rotated alphabet.
///
/// # Example
///
/// ```
/// use cipherchain::alphabet::Alphabet;
/// use cipherchain::engine::{StaticRotationEngine, SubstitutionEngine};
///
/// let caesar = StaticRotationEngine::new(Alphabet::latin(), 3);
/// assert_eq!(caesar.apply('A', 0).unwrap(), 'D');
/// assert_eq!(caesar.apply('X', 99).unwrap(), 'A');
/// ```
#[derive(Debug, Clone)]
pub struct StaticRotationEngine {
    alphabet: Alphabet,
    offset: i64,
    policy: SymbolPolicy,
    rule: SubstitutionRule,
}

impl StaticRotationEngine {
    pub fn new(alphabet: Alphabet, offset: i64) -> Self {
        let offset = (offset as i128).rem_euclid(alphabet.len() as i128) as i64;
        let rule = alphabet.substitution_map(offset);
        Self {
            alphabet,
            offset,
            policy: SymbolPolicy::default(),
            rule,
        }
    }

    /// Set the handling of symbols outside the alphabet
    pub fn with_policy(mut self, policy: SymbolPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Offset reduced into `[0, alphabet.len())`
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl RotationSource for StaticRotationEngine {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn offset_at(&self, _position: usize) -> i64 {
        self.offset
    }

    fn rotation_rule(&self, _position: usize) -> SubstitutionRule {
        self.rule.clone()
    }
}

impl SubstitutionEngine for StaticRotationEngine {
    fn kind(&self) -> &str {
        "static_rot"
    }

    fn substitution_for(&self, position: usize) -> SubstitutionRule {
        self.rotation_rule(position)
    }

    fn policy(&self) -> SymbolPolicy {
        self.policy
    }

    fn apply(&self, symbol: Symbol, position: usize) -> Result<Symbol> {
        match self.rule.get(symbol) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CipherError;

    #[test]
    fn test_rule_is_position_independent() {
        let engine = StaticRotationEngine::new(Alphabet::latin(), 3);
        assert_eq!(engine.substitution_for(0), engine.substitution_for(12345));
        assert_eq!(engine.substitution_for(7).get('Z'), Some('C'));
    }

    #[test]
    fn test_offset_is_normalized() {
        assert_eq!(StaticRotationEngine::new(Alphabet::latin(), 29).offset(), 3);
        assert_eq!(StaticRotationEngine::new(Alphabet::latin(), -1).offset(), 25);
    }

    #[test]
    fn test_inverse_undoes_apply() {
        let engine = StaticRotationEngine::new(Alphabet::latin(), 13);
        for &symbol in Alphabet::latin().symbols() {
            let encoded = engine.apply(symbol, 4).unwrap();
            assert_eq!(engine.apply_inverse(encoded, 4).unwrap(), symbol);
        }
    }

    #[test]
    fn test_foreign_symbol_policy() {
        let strict = StaticRotationEngine::new(Alphabet::latin(), 3);
        assert_eq!(
            strict.apply(' ', 2),
            Err(CipherError::SymbolNotInAlphabet {
                symbol: ' ',
                position: 2
            })
        );

        let lenient = strict.with_policy(SymbolPolicy::PassThrough);
        assert_eq!(lenient.apply(' ', 2), Ok(' '));
        assert_eq!(lenient.apply_inverse(' ', 2), Ok(' '));
    }
}
