//! Pipeline configuration files.
//!
//! A configuration declares one alphabet, a set of named pipelines and the
//! text formatting applied around them. Files are read as JSON or TOML,
//! chosen by extension:
//!
//! ```toml
//! [alphabet]
//! keyword = "KRYPTOS"
//!
//! [[pipelines.classic]]
//! engine = "static_rot"
//! shift = 3
//!
//! [[pipelines.classic]]
//! engine = "plugboard"
//! map = { A = "Z", Z = "A" }
//! ```
//!
//! Steps are resolved by name through an [`EngineRegistry`]. Engine errors
//! are kept as [`CipherError`] under the added context, so callers can
//! still `downcast_ref::<CipherError>()`.
//!
//! [`CipherError`]: crate::error::CipherError

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::alphabet::{Alphabet, Symbol};
use crate::engine::{SharedEngine, SymbolPolicy};
use crate::pipeline::CipherPipeline;
use crate::registry::{EngineKind, EngineParams, EngineRegistry};
use crate::text::FormatOptions;

/// Complete cipher configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    pub alphabet: AlphabetConfig,
    /// Named pipelines, each an ordered list of steps
    pub pipelines: BTreeMap<String, Vec<StepConfig>>,
    /// Accept pipelines with no steps (they leave text unchanged)
    pub allow_empty_pipelines: bool,
    pub format: FormatOptions,
}

/// Alphabet declaration.
///
/// Either `symbols` or `ranges`/`extras` may be given, not both. With
/// neither, the Latin uppercase alphabet is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphabetConfig {
    /// Symbols in order, e.g. `"ABCDEFGHIJKLMNOPQRSTUVWXYZ"`
    pub symbols: Option<String>,
    /// Inclusive code-point ranges, e.g. `[[65, 90]]`
    pub ranges: Vec<(u32, u32)>,
    /// Extra code points appended after the ranges
    pub extras: Vec<u32>,
    /// Keyword moved to the front of the alphabet
    pub keyword: Option<String>,
}

impl AlphabetConfig {
    fn has_ranges(&self) -> bool {
        !self.ranges.is_empty() || !self.extras.is_empty()
    }

    /// Build the declared alphabet
    pub fn build(&self) -> Result<Alphabet> {
        let base = match &self.symbols {
            Some(symbols) => Alphabet::from_sequence(symbols.chars())
                .context("Invalid alphabet symbols")?,
            None if self.has_ranges() => Alphabet::from_unicode_ranges(&self.ranges, &self.extras)
                .context("Invalid alphabet ranges")?,
            None => Alphabet::latin(),
        };

        match &self.keyword {
            Some(keyword) => base
                .keyed(keyword)
                .with_context(|| format!("Invalid alphabet keyword {:?}", keyword)),
            None => Ok(base),
        }
    }
}

/// One pipeline step: an engine name plus the parameters it reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepConfig {
    pub engine: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_shift: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_interval: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_step: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_stream: Option<String>,
    /// Plugboard map, both directions of every swap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<SymbolPolicy>,
}

impl StepConfig {
    /// Step with only the engine name set
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            shift: None,
            initial_shift: None,
            shift_interval: None,
            shift_step: None,
            key_stream: None,
            map: None,
            policy: None,
        }
    }

    /// Convert to factory parameters over `alphabet`.
    pub fn to_params(&self, alphabet: &Alphabet) -> Result<EngineParams> {
        let map = self
            .map
            .as_ref()
            .map(|entries| {
                entries
                    .iter()
                    .map(|(from, to)| Ok((single_symbol(from)?, single_symbol(to)?)))
                    .collect::<Result<Vec<(Symbol, Symbol)>>>()
            })
            .transpose()
            .with_context(|| format!("Invalid map for engine '{}'", self.engine))?;

        Ok(EngineParams {
            alphabet: Some(alphabet.clone()),
            shift: self.shift,
            initial_shift: self.initial_shift,
            shift_interval: self.shift_interval,
            shift_step: self.shift_step,
            key_stream: self.key_stream.clone(),
            map,
            policy: self.policy.unwrap_or_default(),
        })
    }
}

fn single_symbol(entry: &str) -> Result<Symbol> {
    let mut chars = entry.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(anyhow!("Map entries must be single characters, got {:?}", entry)),
    }
}

impl CipherConfig {
    /// Load a configuration from a `.json` or `.toml` file and validate it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {:?}", path))?;

        let config: CipherConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .context("Failed to parse configuration JSON")?,
            Some("toml") => toml::from_str(&content)
                .context("Failed to parse configuration TOML")?,
            other => bail!(
                "Unsupported configuration format {:?} (expected .json or .toml)",
                other.unwrap_or("")
            ),
        };

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {:?}", path))?;

        info!(
            path = %path.display(),
            pipelines = config.pipelines.len(),
            "Loaded cipher configuration"
        );
        Ok(config)
    }

    /// Check structure without building any engine.
    pub fn validate(&self) -> Result<()> {
        if self.alphabet.symbols.is_some() && self.alphabet.has_ranges() {
            bail!("Alphabet must be given as either symbols or ranges, not both");
        }
        if self.alphabet.symbols.as_deref() == Some("") {
            bail!("Alphabet symbols must not be empty");
        }

        if self.pipelines.is_empty() {
            bail!("At least one pipeline must be defined");
        }

        for (name, steps) in &self.pipelines {
            if steps.is_empty() && !self.allow_empty_pipelines {
                bail!(
                    "Pipeline '{}' has no steps (set allow_empty_pipelines to accept it)",
                    name
                );
            }

            for (index, step) in steps.iter().enumerate() {
                if step.engine.trim().is_empty() {
                    bail!("Step {} of pipeline '{}' has no engine name", index, name);
                }
                if let Some(map) = &step.map {
                    for (from, to) in map {
                        single_symbol(from)
                            .and_then(|_| single_symbol(to))
                            .with_context(|| {
                                format!("Step {} of pipeline '{}' has an invalid map", index, name)
                            })?;
                    }
                }
                if step.engine == EngineKind::AlbertiRot.to_string() && step.shift_interval == Some(0)
                {
                    bail!(
                        "Step {} of pipeline '{}': shift_interval must be positive",
                        index,
                        name
                    );
                }
            }
        }

        Ok(())
    }

    /// Names of the declared pipelines in sorted order
    pub fn pipeline_names(&self) -> impl Iterator<Item = &str> {
        self.pipelines.keys().map(String::as_str)
    }

    /// Build the pipeline called `name`, resolving engines in `registry`.
    pub fn build_pipeline(&self, name: &str, registry: &EngineRegistry) -> Result<CipherPipeline> {
        let steps = self
            .pipelines
            .get(name)
            .ok_or_else(|| anyhow!("Pipeline '{}' is not defined", name))?;
        let alphabet = self.alphabet.build()?;

        let mut engines: Vec<SharedEngine> = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let params = step.to_params(&alphabet)?;
            let engine = registry.create(&step.engine, &params).with_context(|| {
                format!(
                    "Failed to build step {} ({}) of pipeline '{}'",
                    index, step.engine, name
                )
            })?;
            engines.push(engine);
        }

        let pipeline = CipherPipeline::builder()
            .engines(engines)
            .allow_empty(self.allow_empty_pipelines)
            .build()
            .with_context(|| format!("Failed to build pipeline '{}'", name))?;

        debug!(pipeline = %name, engines = ?pipeline.engine_kinds(), "Built pipeline");
        Ok(pipeline)
    }

    /// Build every declared pipeline.
    pub fn build_pipelines(&self, registry: &EngineRegistry) -> Result<BTreeMap<String, CipherPipeline>> {
        self.pipelines
            .keys()
            .map(|name| Ok((name.clone(), self.build_pipeline(name, registry)?)))
            .collect()
    }
}
