//! Thin analysis host.
//!
//! Stands in for the application layer at its interface boundary: it loads a
//! normalized encounter file, picks the module roster, runs one analysis,
//! and prints the report. It deliberately knows nothing about any specific
//! game content; module selection beyond the built-ins belongs to a real
//! host embedding `vantage-core`.

mod config;
mod input;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::EnvFilter;

use vantage_core::ModuleRegistry;

use config::CliConfig;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("{0}")]
    Input(String),
    #[error(transparent)]
    Analysis(#[from] vantage_core::AnalysisError),
}

#[derive(Parser)]
#[command(version, about = "Encounter log analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one encounter file and print the report
    Analyze {
        /// Normalized encounter file (JSON: metadata + events)
        #[arg(short, long)]
        input: PathBuf,
        /// Optional TOML config (module roster, severity floor)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the raw report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the registered modules and their dependencies
    Modules,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Analyze { input, config, json } => {
            let config = match config {
                Some(path) => CliConfig::load(&path)?,
                None => CliConfig::default(),
            };
            let registry = build_registry(&config);
            let encounter = input::load_encounter(&input)?;

            let report = vantage_core::analyze(&registry, &encounter)?;
            if json {
                // Serialization of the report types is infallible by
                // construction (plain strings and integers).
                match serde_json::to_string_pretty(&report) {
                    Ok(text) => println!("{text}"),
                    Err(err) => return Err(CliError::Input(err.to_string())),
                }
            } else {
                print!("{}", render::render_text(&report, config.min_severity));
            }
            Ok(())
        }
        Commands::Modules => {
            let registry = ModuleRegistry::with_defaults();
            for (name, deps) in registry.modules() {
                if deps.is_empty() {
                    println!("{name}");
                } else {
                    println!("{name} (requires: {})", deps.join(", "));
                }
            }
            Ok(())
        }
    }
}

fn build_registry(config: &CliConfig) -> ModuleRegistry {
    let mut registry = ModuleRegistry::with_defaults();
    for name in &config.disabled_modules {
        tracing::debug!(module = %name, "module disabled by config");
        registry.remove(name);
    }
    registry
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
