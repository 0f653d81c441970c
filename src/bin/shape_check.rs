//! Shape Check CLI
//!
//! Validates JSON response documents against expectation files.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use response_shape::{
    check_pair, discover_pairs, load_expectation, load_json, ShapeConfig, ShapeValidator,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shape-check")]
#[command(about = "Check JSON responses against expectation trees")]
struct Cli {
    /// Config file (defaults to shapes.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a single document
    Check {
        /// Decoded response document (JSON)
        document: PathBuf,
        /// Expectation tree (JSON)
        expectation: PathBuf,
        /// Fail on declared properties missing from the document
        #[arg(long)]
        strict: bool,
    },

    /// Check every <name>.expect.json / <name>.json pair in a directory
    Suite {
        /// Directory to scan
        dir: PathBuf,
        /// Fail on declared properties missing from the document
        #[arg(long)]
        strict: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ShapeConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Check {
            document,
            expectation,
            strict,
        } => {
            let validator = validator_for(&config, strict);
            let doc = load_json(&document)
                .with_context(|| format!("reading document {}", document.display()))?;
            let exp = load_expectation(&expectation)
                .with_context(|| format!("reading expectation {}", expectation.display()))?;

            validator.validate(&doc, &exp)?;
            println!("✅ {} matches {}", document.display(), expectation.display());
            Ok(())
        }

        Commands::Suite { dir, strict } => {
            let validator = validator_for(&config, strict);
            let pairs = discover_pairs(&dir, &config.suite);
            if pairs.is_empty() {
                anyhow::bail!("no fixture pairs found under {}", dir.display());
            }

            println!("🔍 Checking {} fixture(s) in {}", pairs.len(), dir.display());
            let mut failed = 0;
            for pair in &pairs {
                match check_pair(&validator, pair) {
                    Ok(()) => println!("  ✅ {}", pair.name),
                    Err(e) => {
                        failed += 1;
                        println!("  ❌ {} - {}", pair.name, e);
                    }
                }
            }

            println!();
            if failed > 0 {
                println!("❌ {} of {} fixture(s) failed", failed, pairs.len());
                std::process::exit(1);
            }
            println!("✅ All fixtures match");
            Ok(())
        }

        Commands::Config { output } => {
            if let Some(path) = output {
                config.save(&path)?;
                println!("✅ Config written to {}", path);
            } else {
                print!("{}", config.to_toml()?);
            }
            Ok(())
        }
    }
}

fn validator_for(config: &ShapeConfig, strict: bool) -> ShapeValidator {
    let mut options = config.validator_options();
    options.require_properties |= strict;
    ShapeValidator::with_options(options)
}
