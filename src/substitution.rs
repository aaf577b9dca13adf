//! Position-specific substitution rules.
//!
//! A [`SubstitutionRule`] is the value an engine hands out for a single text
//! position: a map from input symbol to output symbol. Rules are immutable
//! and share their map, so cloning one out of an engine is cheap.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use crate::alphabet::Symbol;

/// Immutable symbol-to-symbol map valid at one text position.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionRule {
    map: Arc<HashMap<Symbol, Symbol>>,
}

impl SubstitutionRule {
    /// Build a rule from explicit `(input, output)` pairs.
    ///
    /// Later pairs win when an input repeats; callers that need uniqueness
    /// validate their keys before building.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Symbol, Symbol)>) -> Self {
        pairs.into_iter().collect()
    }

    /// Output for `symbol`, or `None` when the symbol is outside the rule.
    pub fn get(&self, symbol: Symbol) -> Option<Symbol> {
        self.map.get(&symbol).copied()
    }

    /// Whether the rule has an entry for `symbol`.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.map.contains_key(&symbol)
    }

    /// Rule with inputs and outputs swapped.
    ///
    /// Only meaningful for bijective rules; for anything else later entries
    /// shadow earlier ones.
    pub fn inverse(&self) -> Self {
        self.map.iter().map(|(&from, &to)| (to, from)).collect()
    }

    /// No two inputs share an output.
    pub fn is_bijective(&self) -> bool {
        let outputs: HashSet<&Symbol> = self.map.values().collect();
        outputs.len() == self.map.len()
    }

    /// Applying the rule twice is the identity on its domain.
    pub fn is_involution(&self) -> bool {
        self.map
            .iter()
            .all(|(from, to)| self.map.get(to) == Some(from))
    }

    /// Number of mapped symbols
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(input, output)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Symbol)> + '_ {
        self.map.iter().map(|(&from, &to)| (from, to))
    }
}

impl FromIterator<(Symbol, Symbol)> for SubstitutionRule {
    fn from_iter<I: IntoIterator<Item = (Symbol, Symbol)>>(iter: I) -> Self {
        Self {
            map: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl PartialEq for SubstitutionRule {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl Eq for SubstitutionRule {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_swaps_pairs() {
        let rule = SubstitutionRule::from_pairs([('A', 'B'), ('B', 'C'), ('C', 'A')]);
        let inverse = rule.inverse();
        assert_eq!(inverse.get('B'), Some('A'));
        assert_eq!(inverse.get('A'), Some('C'));
        assert_eq!(inverse.inverse(), rule);
    }

    #[test]
    fn test_bijection_and_involution_checks() {
        let cycle = SubstitutionRule::from_pairs([('A', 'B'), ('B', 'C'), ('C', 'A')]);
        assert!(cycle.is_bijective());
        assert!(!cycle.is_involution());

        let swap = SubstitutionRule::from_pairs([('A', 'Z'), ('Z', 'A'), ('M', 'M')]);
        assert!(swap.is_bijective());
        assert!(swap.is_involution());

        let collapsing = SubstitutionRule::from_pairs([('A', 'C'), ('B', 'C')]);
        assert!(!collapsing.is_bijective());
    }

    #[test]
    fn test_unknown_symbol_is_none() {
        let rule = SubstitutionRule::from_pairs([('A', 'B')]);
        assert_eq!(rule.get('Q'), None);
        assert!(!rule.contains('Q'));
        assert_eq!(rule.len(), 1);
    }
}
