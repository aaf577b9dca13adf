//! Substitution engines.
//!
//! An engine turns a text position into a [`SubstitutionRule`]. Engines are
//! built once from validated parameters and never change afterwards, so a
//! single engine can be shared by any number of pipelines and threads.
//!
//! | Engine                      | Rule at position `p`                              |
//! |-----------------------------|---------------------------------------------------|
//! | [`StaticRotationEngine`]    | `substitution_map(offset)`                        |
//! | [`ProgressiveRotationEngine`] | `substitution_map(start + step * (p / interval))` |
//! | [`KeywordRotationEngine`]   | `substitution_map(index_of(keyword[p % len]))`    |
//! | [`PlugboardEngine`]         | fixed self-inverse map                            |
//!
//! Symbols outside an engine's domain are handled according to its
//! [`SymbolPolicy`]: either rejected or passed through unchanged. Engines
//! never invent a substitution.

pub mod inverse;
pub mod keyword;
pub mod plugboard;
pub mod progressive;
pub mod static_rotation;

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::alphabet::{Alphabet, Symbol};
use crate::error::{CipherError, Result};
use crate::substitution::SubstitutionRule;

pub use inverse::InverseEngine;
pub use keyword::KeywordRotationEngine;
pub use plugboard::PlugboardEngine;
pub use progressive::ProgressiveRotationEngine;
pub use static_rotation::StaticRotationEngine;

/// What an engine does with a symbol outside its domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SymbolPolicy {
    /// Abort with [`CipherError::SymbolNotInAlphabet`]
    #[default]
    Strict,
    /// Emit the symbol unchanged
    PassThrough,
}

impl SymbolPolicy {
    /// Resolve a symbol the engine has no substitution for.
    pub fn unmapped(self, symbol: Symbol, position: usize) -> Result<Symbol> {
        match self {
            SymbolPolicy::Strict => Err(CipherError::SymbolNotInAlphabet { symbol, position }),
            SymbolPolicy::PassThrough => Ok(symbol),
        }
    }
}

/// A strategy deriving a substitution rule for every text position.
///
/// # Contract
///
/// - `substitution_for(p)` is a pure function of `p` and the engine's own
///   parameters, and is a bijection over the engine's domain.
/// - `apply(s, p)` equals `substitution_for(p)` applied to `s`, with foreign
///   symbols resolved by [`SubstitutionEngine::policy`].
/// - `apply_inverse(apply(s, p), p) == s` for every symbol in the domain.
pub trait SubstitutionEngine: Debug + Send + Sync {
    /// Engine kind, matching its registry name for the built-in engines.
    fn kind(&self) -> &str;

    /// Substitution rule valid at `position`.
    fn substitution_for(&self, position: usize) -> SubstitutionRule;

    /// Handling of symbols outside the engine's domain
    fn policy(&self) -> SymbolPolicy {
        SymbolPolicy::Strict
    }

    /// Substitute `symbol` as found at `position`.
    fn apply(&self, symbol: Symbol, position: usize) -> Result<Symbol> {
        match self.substitution_for(position).get(symbol) {
            Some(output) => Ok(output),
            None => self.policy().unmapped(symbol, position),
        }
    }

    /// Undo [`SubstitutionEngine::apply`] for `symbol` at `position`.
    fn apply_inverse(&self, symbol: Symbol, position: usize) -> Result<Symbol> {
        match self.substitution_for(position).inverse().get(symbol) {
            Some(output) => Ok(output),
            None => self.policy().unmapped(symbol, position),
        }
    }
}

/// Engine handle shared between pipelines
pub type SharedEngine = Arc<dyn SubstitutionEngine>;

/// Common shape of the rotation engines: one alphabet and an offset that
/// depends on the text position.
pub trait RotationSource {
    fn alphabet(&self) -> &Alphabet;

    /// Rotation offset at `position`, already reduced modulo the alphabet
    /// length.
    fn offset_at(&self, position: usize) -> i64;

    fn rotation_rule(&self, position: usize) -> SubstitutionRule {
        self.alphabet().substitution_map(self.offset_at(position))
    }

    /// Rotate one symbol forward, `None` if it is foreign to the alphabet.
    fn rotate_symbol(&self, symbol: Symbol, position: usize) -> Option<Symbol> {
        self.alphabet().shift(symbol, self.offset_at(position))
    }

    /// Rotate one symbol backward, `None` if it is foreign to the alphabet.
    fn unrotate_symbol(&self, symbol: Symbol, position: usize) -> Option<Symbol> {
        self.alphabet().shift(symbol, -self.offset_at(position))
    }
}

/// Reduce `start + step * block` modulo `length` without overflow.
pub(crate) fn wrapped_offset(start: i64, step: i64, block: usize, length: usize) -> i64 {
    let raw = start as i128 + step as i128 * block as i128;
    raw.rem_euclid(length as i128) as i64
}
