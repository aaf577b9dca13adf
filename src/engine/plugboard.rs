//! Static pairwise remapping.
//!
//! A plugboard swaps fixed pairs of symbols at every position. The map must
//! be its own inverse: if `A` is wired to `B`, `B` must be wired to `A`.
//! Symbols that are not wired pass through unchanged.

use crate::alphabet::{Alphabet, Symbol};
use crate::error::{CipherError, Result};
use crate::sequence;
use crate::substitution::SubstitutionRule;

use super::{SubstitutionEngine, SymbolPolicy};

#[derive(Debug, Clone)]
pub struct PlugboardEngine {
    rule: SubstitutionRule,
    domain: Option<Alphabet>,
    policy: SymbolPolicy,
}

impl PlugboardEngine {
    /// Build from a complete symbol map (both directions of every swap).
    ///
    /// Fails with [`CipherError::InvalidSequence`] if a key repeats and with
    /// [`CipherError::AsymmetricMapping`] if the map is not self-inverse.
    pub fn new(map: impl IntoIterator<Item = (Symbol, Symbol)>) -> Result<Self> {
        let pairs: Vec<(Symbol, Symbol)> = map.into_iter().collect();
        let keys: Vec<Symbol> = pairs.iter().map(|&(from, _)| from).collect();
        sequence::ensure_unique(&keys)?;

        let rule = SubstitutionRule::from_pairs(pairs.iter().copied());
        for &(symbol, image) in &pairs {
            if rule.get(image) != Some(symbol) {
                return Err(CipherError::AsymmetricMapping { symbol, image });
            }
        }

        Ok(Self {
            rule,
            domain: None,
            policy: SymbolPolicy::PassThrough,
        })
    }

    /// Build from wiring pairs, each `(a, b)` meaning `a <-> b`.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Symbol, Symbol)>) -> Result<Self> {
        let map: Vec<(Symbol, Symbol)> = pairs
            .into_iter()
            .flat_map(|(a, b)| if a == b { vec![(a, a)] } else { vec![(a, b), (b, a)] })
            .collect();
        Self::new(map)
    }

    /// Plugboard over a declared alphabet.
    ///
    /// Unwired alphabet symbols map to themselves, making the rule a
    /// bijection over the whole alphabet; symbols outside it are resolved by
    /// `policy`. Every wired symbol must belong to the alphabet.
    pub fn over(
        alphabet: Alphabet,
        map: impl IntoIterator<Item = (Symbol, Symbol)>,
        policy: SymbolPolicy,
    ) -> Result<Self> {
        let wired = Self::new(map)?;
        for (from, _) in wired.rule.iter() {
            alphabet.index_of(from)?;
        }

        let rule = alphabet
            .symbols()
            .iter()
            .map(|&symbol| (symbol, wired.rule.get(symbol).unwrap_or(symbol)))
            .collect();

        Ok(Self {
            rule,
            domain: Some(alphabet),
            policy,
        })
    }

    /// Alphabet the plugboard was declared over, if any
    pub fn domain(&self) -> Option<&Alphabet> {
        self.domain.as_ref()
    }

    /// Wired swaps as `(a, b)` with `a < b`, sorted.
    pub fn swaps(&self) -> Vec<(Symbol, Symbol)> {
        let mut swaps: Vec<(Symbol, Symbol)> =
            self.rule.iter().filter(|&(from, to)| from < to).collect();
        swaps.sort_unstable();
        swaps
    }
}

impl SubstitutionEngine for PlugboardEngine {
    fn kind(&self) -> &str {
        "plugboard"
    }

    fn substitution_for(&self, _position: usize) -> SubstitutionRule {
        self.rule.clone()
    }

    fn policy(&self) -> SymbolPolicy {
        self.policy
    }

    fn apply(&self, symbol: Symbol, position: usize) -> Result<Symbol> {
        if let Some(output) = self.rule.get(symbol) {
            return Ok(output);
        }
        match self.domain {
            Some(_) => self.policy.unmapped(symbol, position),
            None => Ok(symbol),
        }
    }

    fn apply_inverse(&self, symbol: Symbol, position: usize) -> Result<Symbol> {
        self.apply(symbol, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_map_accepted() {
        let plugboard = PlugboardEngine::new([('A', 'B'), ('B', 'A')]).unwrap();
        assert_eq!(plugboard.apply('A', 0).unwrap(), 'B');
        assert_eq!(plugboard.apply('B', 9).unwrap(), 'A');
        assert_eq!(plugboard.apply('Q', 3).unwrap(), 'Q');
        assert!(plugboard.substitution_for(0).is_involution());
    }

    #[test]
    fn test_asymmetric_map_rejected() {
        let result = PlugboardEngine::new([('A', 'B'), ('B', 'A'), ('C', 'D')]);
        assert_eq!(
            result.unwrap_err(),
            CipherError::AsymmetricMapping {
                symbol: 'C',
                image: 'D'
            }
        );

        let crossed = PlugboardEngine::new([('A', 'B'), ('B', 'C'), ('C', 'A')]);
        assert!(matches!(crossed, Err(CipherError::AsymmetricMapping { .. })));
    }

    #[test]
    fn test_repeated_key_rejected() {
        let result = PlugboardEngine::new([('A', 'B'), ('B', 'A'), ('A', 'C')]);
        assert!(matches!(result, Err(CipherError::InvalidSequence { .. })));
    }

    #[test]
    fn test_from_pairs_wires_both_directions() {
        let plugboard = PlugboardEngine::from_pairs([('A', 'Z'), ('M', 'N')]).unwrap();
        assert_eq!(plugboard.swaps(), vec![('A', 'Z'), ('M', 'N')]);
        assert_eq!(plugboard.apply('Z', 0).unwrap(), 'A');

        assert!(PlugboardEngine::from_pairs([('A', 'B'), ('B', 'C')]).is_err());
    }

    #[test]
    fn test_over_alphabet_is_full_bijection() {
        let plugboard =
            PlugboardEngine::over(Alphabet::latin(), [('A', 'Z'), ('Z', 'A')], SymbolPolicy::Strict)
                .unwrap();
        let rule = plugboard.substitution_for(0);
        assert_eq!(rule.len(), 26);
        assert!(rule.is_bijective());
        assert_eq!(rule.get('K'), Some('K'));

        assert!(matches!(
            plugboard.apply('a', 5),
            Err(CipherError::SymbolNotInAlphabet { symbol: 'a', position: 5 })
        ));
    }

    #[test]
    fn test_over_alphabet_rejects_foreign_wiring() {
        let result =
            PlugboardEngine::over(Alphabet::latin(), [('a', 'b'), ('b', 'a')], SymbolPolicy::Strict);
        assert!(matches!(result, Err(CipherError::ElementNotFound { .. })));
    }
}
