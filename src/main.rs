//! cipherchain - Main entry point
//!
//! Loads a pipeline configuration and runs text through it.

use std::io::{self, Read};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cipherchain::cli::{Cli, Commands, RunArgs};
use cipherchain::{CipherConfig, EngineRegistry, text};

/// Initialize tracing on stderr.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug output with
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);
    debug!("CLI arguments parsed");

    match cli.command {
        Commands::Encrypt(args) => run_pipeline(&args, Direction::Encrypt),
        Commands::Decrypt(args) => run_pipeline(&args, Direction::Decrypt),
        Commands::Validate { config } => {
            info!("Validating configuration file: {:?}", config);
            let config = CipherConfig::load_from_file(&config)?;
            let registry = EngineRegistry::global();
            let registry = registry
                .read()
                .map_err(|_| anyhow!("Engine registry lock poisoned"))?;
            let pipelines = config.build_pipelines(&registry)?;
            println!("✓ Configuration is valid: {} pipeline(s)", pipelines.len());
            Ok(())
        }
        Commands::Engines => {
            let registry = EngineRegistry::global();
            let registry = registry
                .read()
                .map_err(|_| anyhow!("Engine registry lock poisoned"))?;
            for name in registry.names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Pipelines { config } => {
            let config = CipherConfig::load_from_file(&config)?;
            for (name, steps) in &config.pipelines {
                let engines: Vec<&str> = steps.iter().map(|step| step.engine.as_str()).collect();
                println!("{}: {}", name, engines.join(" -> "));
            }
            Ok(())
        }
    }
}

/// Encrypt or decrypt one message with a configured pipeline
fn run_pipeline(args: &RunArgs, direction: Direction) -> Result<()> {
    let config = CipherConfig::load_from_file(&args.config)?;
    let registry = EngineRegistry::global();
    let pipeline = {
        let registry = registry
            .read()
            .map_err(|_| anyhow!("Engine registry lock poisoned"))?;
        config.build_pipeline(&args.pipeline, &registry)?
    };

    let input = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let output = match direction {
        Direction::Encrypt => {
            let prepared = if args.raw {
                input
            } else {
                text::prepare(&input, &config.format)
            };
            let cipher = pipeline.run(&prepared, args.start)?;
            if args.raw {
                cipher
            } else {
                text::present(&cipher, &config.format)
            }
        }
        Direction::Decrypt => {
            // Grouping spaces are presentation only.
            let prepared = if args.raw {
                input
            } else {
                text::remove_whitespace(&input)
            };
            pipeline.inverse().run(&prepared, args.start)?
        }
    };

    info!(
        pipeline = %args.pipeline,
        direction = ?direction,
        symbols = output.chars().count(),
        "Pipeline finished"
    );
    println!("{}", output);
    Ok(())
}
