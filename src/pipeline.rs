//! Ordered composition of substitution engines.
//!
//! A [`CipherPipeline`] feeds every symbol of the input through each engine
//! in declared order. All engines see the same absolute position for a
//! given symbol; the counter starts at the caller's `starting_position` and
//! is never reset between engines. That is what lets progressive and
//! keyword engines line up when a message is processed in pieces.
//!
//! # Failure semantics
//!
//! The first engine error aborts the whole run and no partial output is
//! returned.
//!
//! # Reversal
//!
//! [`CipherPipeline::inverse`] builds the pipeline that undoes this one: the
//! engine list reversed, each engine wrapped in an [`InverseEngine`]. It is
//! never applied implicitly.

use std::sync::Arc;

use tracing::debug;

use crate::engine::{InverseEngine, SharedEngine, SubstitutionEngine};
use crate::error::{CipherError, Result};

/// Ordered list of already-constructed engines.
#[derive(Debug, Clone, Default)]
pub struct CipherPipeline {
    engines: Vec<SharedEngine>,
}

impl CipherPipeline {
    /// Assemble a pipeline, rejecting an empty engine list with
    /// [`CipherError::EmptyPipeline`].
    pub fn new(engines: Vec<SharedEngine>) -> Result<Self> {
        Self::builder().engines(engines).build()
    }

    /// Start a pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Pipeline with no engines; `run` returns its input unchanged.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Transform `text`, numbering its symbols from `starting_position`.
    ///
    /// Fails with [`CipherError::PositionOverflow`] if a symbol's position
    /// would exceed `usize::MAX`.
    pub fn run(&self, text: &str, starting_position: usize) -> Result<String> {
        debug!(
            engines = self.engines.len(),
            symbols = text.chars().count(),
            starting_position,
            "Running cipher pipeline"
        );

        text.chars()
            .enumerate()
            .map(|(offset, symbol)| {
                let position = starting_position.checked_add(offset).ok_or(
                    CipherError::PositionOverflow {
                        starting_position,
                        offset,
                    },
                )?;
                self.transform(symbol, position)
            })
            .collect()
    }

    /// Equivalent to `run(text, 0)`
    pub fn encrypt(&self, text: &str) -> Result<String> {
        self.run(text, 0)
    }

    /// Run the inverse pipeline from position 0.
    pub fn decrypt(&self, text: &str) -> Result<String> {
        self.inverse().run(text, 0)
    }

    /// Pipeline undoing this one: engines reversed, each inverted.
    pub fn inverse(&self) -> Self {
        let engines = self
            .engines
            .iter()
            .rev()
            .map(|engine| Arc::new(InverseEngine::new(Arc::clone(engine))) as SharedEngine)
            .collect();
        Self { engines }
    }

    /// Pass a single symbol through every engine at `position`.
    pub fn transform(&self, symbol: char, position: usize) -> Result<char> {
        self.engines
            .iter()
            .try_fold(symbol, |current, engine| engine.apply(current, position))
    }

    pub fn engines(&self) -> &[SharedEngine] {
        &self.engines
    }

    /// Kinds of the engines in declared order
    pub fn engine_kinds(&self) -> Vec<&str> {
        self.engines.iter().map(|engine| engine.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

/// Builder for [`CipherPipeline`].
///
/// An empty pipeline is a construction error unless `allow_empty(true)` is
/// set, in which case it is a no-op.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    engines: Vec<SharedEngine>,
    allow_empty: bool,
}

impl PipelineBuilder {
    /// Append an engine
    pub fn engine(mut self, engine: impl SubstitutionEngine + 'static) -> Self {
        self.engines.push(Arc::new(engine));
        self
    }

    /// Append an engine that is already shared
    pub fn shared(mut self, engine: SharedEngine) -> Self {
        self.engines.push(engine);
        self
    }

    /// Append several shared engines in order
    pub fn engines(mut self, engines: impl IntoIterator<Item = SharedEngine>) -> Self {
        self.engines.extend(engines);
        self
    }

    /// Accept an engine-less pipeline as a no-op
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    pub fn build(self) -> Result<CipherPipeline> {
        if self.engines.is_empty() && !self.allow_empty {
            return Err(CipherError::EmptyPipeline);
        }
        Ok(CipherPipeline {
            engines: self.engines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::engine::{
        KeywordRotationEngine, PlugboardEngine, ProgressiveRotationEngine, StaticRotationEngine,
        SymbolPolicy,
    };

    fn caesar() -> CipherPipeline {
        CipherPipeline::builder()
            .engine(StaticRotationEngine::new(Alphabet::latin(), 3))
            .build()
            .unwrap()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_empty_pipeline_rejected_by_default() {
        assert_eq!(CipherPipeline::new(Vec::new()).unwrap_err(), CipherError::EmptyPipeline);
        assert_eq!(
            CipherPipeline::builder().build().unwrap_err(),
            CipherError::EmptyPipeline
        );
    }

    #[test]
    fn test_empty_pipeline_allowed_explicitly_is_noop() {
        let pipeline = CipherPipeline::builder().allow_empty(true).build().unwrap();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.run("ANY text 123", 7).unwrap(), "ANY text 123");
        assert_eq!(CipherPipeline::identity().run("abc", 0).unwrap(), "abc");
    }

    // =========================================================================
    // Execution
    // =========================================================================

    #[test]
    fn test_caesar_hello() {
        assert_eq!(caesar().encrypt("HELLO").unwrap(), "KHOOR");
    }

    #[test]
    fn test_position_shared_across_engines() {
        // Two progressive engines both see position p, so the combined
        // offset at p is 2p rather than p + (p - something).
        let pipeline = CipherPipeline::builder()
            .engine(ProgressiveRotationEngine::new(Alphabet::latin(), 0))
            .engine(ProgressiveRotationEngine::new(Alphabet::latin(), 0))
            .build()
            .unwrap();
        assert_eq!(pipeline.run("AAAA", 0).unwrap(), "ACEG");
        assert_eq!(pipeline.run("AA", 2).unwrap(), "EG");
    }

    #[test]
    fn test_failure_aborts_whole_run() {
        let error = caesar().run("HEL LO", 0).unwrap_err();
        assert_eq!(
            error,
            CipherError::SymbolNotInAlphabet {
                symbol: ' ',
                position: 3
            }
        );
    }

    #[test]
    fn test_last_position_runs_then_overflow_aborts() {
        assert_eq!(caesar().run("A", usize::MAX).unwrap(), "D");
        assert_eq!(
            caesar().run("AB", usize::MAX).unwrap_err(),
            CipherError::PositionOverflow {
                starting_position: usize::MAX,
                offset: 1
            }
        );
        assert_eq!(
            caesar().inverse().run("AB", usize::MAX).unwrap_err(),
            CipherError::PositionOverflow {
                starting_position: usize::MAX,
                offset: 1
            }
        );
    }

    #[test]
    fn test_pass_through_policy_keeps_foreign_symbols() {
        let pipeline = CipherPipeline::builder()
            .engine(
                StaticRotationEngine::new(Alphabet::latin(), 3)
                    .with_policy(SymbolPolicy::PassThrough),
            )
            .build()
            .unwrap();
        assert_eq!(pipeline.encrypt("HEL LO!").unwrap(), "KHO OR!");
    }

    // =========================================================================
    // Order and reversal
    // =========================================================================

    #[test]
    fn test_order_matters() {
        let rot = StaticRotationEngine::new(Alphabet::latin(), 3);
        let plug = PlugboardEngine::from_pairs([('A', 'Z')]).unwrap();

        let rot_first = CipherPipeline::builder()
            .engine(rot.clone())
            .engine(plug.clone())
            .build()
            .unwrap();
        let plug_first = CipherPipeline::builder()
            .engine(plug)
            .engine(rot)
            .build()
            .unwrap();

        assert_eq!(rot_first.encrypt("A").unwrap(), "D");
        assert_eq!(plug_first.encrypt("A").unwrap(), "C");
    }

    #[test]
    fn test_inverse_round_trip() {
        let pipeline = CipherPipeline::builder()
            .engine(PlugboardEngine::from_pairs([('E', 'T'), ('A', 'Q')]).unwrap())
            .engine(KeywordRotationEngine::new(Alphabet::latin(), "CIPHER").unwrap())
            .engine(
                ProgressiveRotationEngine::new(Alphabet::latin(), 4)
                    .with_step(3)
                    .with_interval(2)
                    .unwrap(),
            )
            .build()
            .unwrap();

        let plain = "ATTACKATDAWNONTHEEASTERNFRONT";
        let cipher = pipeline.encrypt(plain).unwrap();
        assert_ne!(cipher, plain);
        assert_eq!(pipeline.decrypt(&cipher).unwrap(), plain);
        assert_eq!(pipeline.inverse().run(&pipeline.run(plain, 11).unwrap(), 11).unwrap(), plain);
    }

    #[test]
    fn test_inverse_reverses_engine_order() {
        let pipeline = CipherPipeline::builder()
            .engine(StaticRotationEngine::new(Alphabet::latin(), 1))
            .engine(PlugboardEngine::from_pairs([('B', 'C')]).unwrap())
            .build()
            .unwrap();
        assert_eq!(pipeline.engine_kinds(), vec!["static_rot", "plugboard"]);
        assert_eq!(pipeline.inverse().engine_kinds(), vec!["plugboard", "static_rot"]);
    }
}
