//! cipherchain Library
//!
//! Classical substitution ciphers built from a few primitives: validated
//! symbol sequences, alphabets with their rotations, and position-dependent
//! substitution engines composed into ordered pipelines.
//!
//! ```
//! use cipherchain::{Alphabet, CipherPipeline, EngineParams, EngineRegistry};
//!
//! let registry = EngineRegistry::with_builtin_engines();
//! let caesar = registry
//!     .create("static_rot", &EngineParams::new(Alphabet::latin()).with_shift(3))
//!     .unwrap();
//! let pipeline = CipherPipeline::new(vec![caesar]).unwrap();
//! assert_eq!(pipeline.encrypt("HELLO").unwrap(), "KHOOR");
//! ```

pub mod alphabet;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod sequence;
pub mod substitution;
pub mod table;
pub mod text;

// Re-export main types for convenience
pub use alphabet::{Alphabet, Symbol};
pub use config::{AlphabetConfig, CipherConfig, StepConfig};
pub use engine::{
    InverseEngine, KeywordRotationEngine, PlugboardEngine, ProgressiveRotationEngine,
    RotationSource, SharedEngine, StaticRotationEngine, SubstitutionEngine, SymbolPolicy,
};
pub use error::CipherError;
pub use pipeline::{CipherPipeline, PipelineBuilder};
pub use registry::{EngineFactory, EngineKind, EngineParams, EngineRegistry};
pub use substitution::SubstitutionRule;
pub use table::RotationTable;
pub use text::FormatOptions;
