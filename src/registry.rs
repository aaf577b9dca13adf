//! Name-indexed engine factories.
//!
//! The registry maps an engine name (as written in a pipeline configuration)
//! to a factory that builds the engine from typed [`EngineParams`].
//! Registration is explicit: nothing is discovered by scanning, and
//! registering a name twice is an error rather than an overwrite.
//!
//! # Process-wide registry
//!
//! [`EngineRegistry::global`] returns a lazily-initialized shared registry
//! seeded with the built-in engines. It is meant to be extended during
//! start-up and read afterwards; the `RwLock` serializes any later
//! registration.
//!
//! # Error separation
//!
//! [`EngineRegistry::create`] fails with [`CipherError::UnknownEngine`] only
//! when the name is absent. Errors raised by a factory (bad alphabet, missing
//! parameter, asymmetric plugboard) are returned exactly as the factory
//! produced them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::debug;

use crate::alphabet::{Alphabet, Symbol};
use crate::engine::{
    KeywordRotationEngine, PlugboardEngine, ProgressiveRotationEngine, SharedEngine,
    StaticRotationEngine, SymbolPolicy,
};
use crate::error::{CipherError, Result};

/// Global registry, seeded with the built-in engines on first use
static ENGINE_REGISTRY: OnceLock<Arc<RwLock<EngineRegistry>>> = OnceLock::new();

/// Factory building an engine from parameters
pub type EngineFactory = Arc<dyn Fn(&EngineParams) -> Result<SharedEngine> + Send + Sync>;

/// Engines available without any registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumString, EnumIter)]
pub enum EngineKind {
    /// Fixed-offset rotation
    #[strum(serialize = "static_rot")]
    StaticRot,
    /// Progressive rotation
    #[strum(serialize = "alberti_rot")]
    AlbertiRot,
    /// Keyword rotation
    #[strum(serialize = "vigenere_rot")]
    VigenereRot,
    /// Pairwise remap
    #[strum(serialize = "plugboard")]
    Plugboard,
}

impl EngineKind {
    /// Build this engine from parameters
    pub fn build(self, params: &EngineParams) -> Result<SharedEngine> {
        let name = self.to_string();
        let engine: SharedEngine = match self {
            EngineKind::StaticRot => {
                let alphabet = params.require_alphabet(&name)?;
                let shift = params.shift.ok_or_else(|| CipherError::missing_parameter(&name, "shift"))?;
                Arc::new(StaticRotationEngine::new(alphabet, shift).with_policy(params.policy))
            }
            EngineKind::AlbertiRot => {
                let alphabet = params.require_alphabet(&name)?;
                let engine = ProgressiveRotationEngine::new(alphabet, params.initial_shift.unwrap_or(0))
                    .with_step(params.shift_step.unwrap_or(1))
                    .with_interval(params.shift_interval.unwrap_or(1))?
                    .with_policy(params.policy);
                Arc::new(engine)
            }
            EngineKind::VigenereRot => {
                let alphabet = params.require_alphabet(&name)?;
                let key_stream = params
                    .key_stream
                    .as_deref()
                    .ok_or_else(|| CipherError::missing_parameter(&name, "key_stream"))?;
                Arc::new(KeywordRotationEngine::new(alphabet, key_stream)?.with_policy(params.policy))
            }
            EngineKind::Plugboard => {
                let map = params
                    .map
                    .clone()
                    .ok_or_else(|| CipherError::missing_parameter(&name, "map"))?;
                match &params.alphabet {
                    Some(alphabet) => Arc::new(PlugboardEngine::over(alphabet.clone(), map, params.policy)?),
                    None => Arc::new(PlugboardEngine::new(map)?),
                }
            }
        };
        Ok(engine)
    }
}

/// Typed, already-validated parameters handed to a factory.
///
/// Each engine reads only the fields it needs; a required field that is
/// `None` yields [`CipherError::MissingParameter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineParams {
    /// Alphabet the engine operates over
    pub alphabet: Option<Alphabet>,
    /// Fixed offset (`static_rot`)
    pub shift: Option<i64>,
    /// Starting offset (`alberti_rot`, default 0)
    pub initial_shift: Option<i64>,
    /// Positions per offset step (`alberti_rot`, default 1)
    pub shift_interval: Option<usize>,
    /// Offset increment per block (`alberti_rot`, default 1)
    pub shift_step: Option<i64>,
    /// Keyword (`vigenere_rot`)
    pub key_stream: Option<String>,
    /// Complete symbol map (`plugboard`)
    pub map: Option<Vec<(Symbol, Symbol)>>,
    /// Handling of symbols outside the alphabet
    pub policy: SymbolPolicy,
}

impl EngineParams {
    /// Parameters over `alphabet` with everything else unset
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet: Some(alphabet),
            ..Self::default()
        }
    }

    pub fn with_shift(mut self, shift: i64) -> Self {
        self.shift = Some(shift);
        self
    }

    pub fn with_initial_shift(mut self, initial_shift: i64) -> Self {
        self.initial_shift = Some(initial_shift);
        self
    }

    pub fn with_shift_interval(mut self, shift_interval: usize) -> Self {
        self.shift_interval = Some(shift_interval);
        self
    }

    pub fn with_shift_step(mut self, shift_step: i64) -> Self {
        self.shift_step = Some(shift_step);
        self
    }

    pub fn with_key_stream(mut self, key_stream: impl Into<String>) -> Self {
        self.key_stream = Some(key_stream.into());
        self
    }

    pub fn with_map(mut self, map: impl IntoIterator<Item = (Symbol, Symbol)>) -> Self {
        self.map = Some(map.into_iter().collect());
        self
    }

    pub fn with_policy(mut self, policy: SymbolPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn require_alphabet(&self, engine: &str) -> Result<Alphabet> {
        self.alphabet
            .clone()
            .ok_or_else(|| CipherError::missing_parameter(engine, "alphabet"))
    }
}

/// Registry of engine factories keyed by name
#[derive(Default)]
pub struct EngineRegistry {
    factories: BTreeMap<String, EngineFactory>,
}

impl EngineRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every [`EngineKind`]
    pub fn with_builtin_engines() -> Self {
        let factories = EngineKind::iter()
            .map(|kind| {
                let factory: EngineFactory = Arc::new(move |params: &EngineParams| kind.build(params));
                (kind.to_string(), factory)
            })
            .collect();
        Self { factories }
    }

    /// Get the process-wide registry
    pub fn global() -> Arc<RwLock<EngineRegistry>> {
        ENGINE_REGISTRY
            .get_or_init(|| Arc::new(RwLock::new(EngineRegistry::with_builtin_engines())))
            .clone()
    }

    /// Register `factory` under `name`.
    ///
    /// Fails with [`CipherError::DuplicateEngineName`] if the name is taken;
    /// the existing factory is kept.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn(&EngineParams) -> Result<SharedEngine> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(CipherError::DuplicateEngineName { name });
        }
        debug!(engine = %name, "Registered engine factory");
        self.factories.insert(name, Arc::new(factory));
        Ok(())
    }

    /// Build the engine registered under `name`.
    pub fn create(&self, name: &str, params: &EngineParams) -> Result<SharedEngine> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| CipherError::UnknownEngine {
                name: name.to_string(),
            })?;
        let engine = factory(params)?;
        debug!(engine = %name, "Created engine");
        Ok(engine)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
