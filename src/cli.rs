use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// cipherchain - classical substitution ciphers as composable pipelines
#[derive(Parser, Debug)]
#[command(name = "cipherchain")]
#[command(about = "Run configured pipelines of rotation, keyword and plugboard ciphers")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt text with a configured pipeline
    Encrypt(RunArgs),
    /// Decrypt text by running the pipeline's inverse
    Decrypt(RunArgs),
    /// Validate a configuration file and build every pipeline in it
    Validate {
        /// Path to configuration file (.json or .toml)
        config: PathBuf,
    },
    /// List the registered engine names
    Engines,
    /// List the pipelines declared in a configuration file
    Pipelines {
        /// Path to configuration file (.json or .toml)
        config: PathBuf,
    },
}

/// Arguments shared by `encrypt` and `decrypt`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Path to configuration file (.json or .toml)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Name of the pipeline to run
    #[arg(short, long)]
    pub pipeline: String,

    /// Absolute position of the first symbol
    #[arg(short, long, default_value_t = 0)]
    pub start: usize,

    /// Skip the configured normalization and grouping
    #[arg(long)]
    pub raw: bool,

    /// Text to process; read from stdin when omitted
    pub text: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
