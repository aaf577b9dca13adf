//! Error handling module for cipherchain
//!
//! Provides the typed error taxonomy for the sequence, alphabet, engine,
//! registry and pipeline layers using thiserror. Every failure is surfaced to
//! the immediate caller; nothing in the core logs-and-continues.

use thiserror::Error;

use crate::alphabet::Symbol;

/// Main error type for the cipher core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// Sequence is empty or contains duplicate elements
    #[error("Invalid sequence: {reason}")]
    InvalidSequence { reason: String },

    /// Rotation requested on a zero-length sequence
    #[error("Cannot rotate a sequence of length {length}")]
    InvalidOffset { length: usize },

    /// Index permutation is not a bijection over the sequence positions
    #[error("Invalid permutation: {reason}")]
    InvalidPermutation { reason: String },

    /// Lookup of an element that the sequence does not contain
    #[error("Element {element} not found in sequence")]
    ElementNotFound { element: String },

    /// Input text contains a symbol outside an engine's domain
    #[error("Symbol {symbol:?} at position {position} is not in the engine alphabet")]
    SymbolNotInAlphabet { symbol: Symbol, position: usize },

    /// Plugboard map is not its own inverse
    #[error("Plugboard maps {symbol:?} to {image:?} but {image:?} does not map back")]
    AsymmetricMapping { symbol: Symbol, image: Symbol },

    /// Registry already holds a factory under this name
    #[error("Engine '{name}' is already registered")]
    DuplicateEngineName { name: String },

    /// Registry has no factory under this name
    #[error("Unknown engine '{name}'")]
    UnknownEngine { name: String },

    /// Factory invoked without a parameter it requires
    #[error("Engine '{engine}' requires parameter '{parameter}'")]
    MissingParameter { engine: String, parameter: String },

    /// Factory parameter present but unusable
    #[error("Invalid parameter for engine '{engine}': {reason}")]
    InvalidParameter { engine: String, reason: String },

    /// Text position past `usize::MAX`
    #[error("Position of symbol {offset} after starting position {starting_position} overflows")]
    PositionOverflow {
        starting_position: usize,
        offset: usize,
    },

    /// Pipeline assembled without engines where a transform is required
    #[error("Pipeline has no engines; build it with allow_empty to get a no-op")]
    EmptyPipeline,
}

/// Result type alias for cipher core operations
pub type Result<T> = std::result::Result<T, CipherError>;

// Convenient error constructors
impl CipherError {
    /// Create an invalid sequence error
    pub fn invalid_sequence(reason: impl Into<String>) -> Self {
        Self::InvalidSequence {
            reason: reason.into(),
        }
    }

    /// Create an invalid permutation error
    pub fn invalid_permutation(reason: impl Into<String>) -> Self {
        Self::InvalidPermutation {
            reason: reason.into(),
        }
    }

    /// Create an element-not-found error from any debuggable element
    pub fn element_not_found(element: &impl std::fmt::Debug) -> Self {
        Self::ElementNotFound {
            element: format!("{:?}", element),
        }
    }

    /// Create a missing parameter error
    pub fn missing_parameter(engine: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            engine: engine.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(engine: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            engine: engine.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was raised by the registry lookup itself rather than
    /// by a factory rejecting its parameters.
    pub fn is_registry_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateEngineName { .. } | Self::UnknownEngine { .. }
        )
    }
}
