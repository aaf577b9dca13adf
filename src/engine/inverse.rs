//! Engine adapter running another engine backwards.

use crate::alphabet::Symbol;
use crate::error::Result;
use crate::substitution::SubstitutionRule;

use super::{SharedEngine, SubstitutionEngine, SymbolPolicy};

/// Applies the inverse of the wrapped engine's rule at every position.
///
/// Built by [`crate::pipeline::CipherPipeline::inverse`]; the wrapped engine
/// is shared, not copied.
#[derive(Debug, Clone)]
pub struct InverseEngine {
    inner: SharedEngine,
}

impl InverseEngine {
    pub fn new(inner: SharedEngine) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &SharedEngine {
        &self.inner
    }
}

impl SubstitutionEngine for InverseEngine {
    fn kind(&self) -> &str {
        self.inner.kind()
    }

    fn substitution_for(&self, position: usize) -> SubstitutionRule {
        self.inner.substitution_for(position).inverse()
    }

    fn policy(&self) -> SymbolPolicy {
        self.inner.policy()
    }

    fn apply(&self, symbol: Symbol, position: usize) -> Result<Symbol> {
        self.inner.apply_inverse(symbol, position)
    }

    fn apply_inverse(&self, symbol: Symbol, position: usize) -> Result<Symbol> {
        self.inner.apply(symbol, position)
    }
}
