//! Agentograph command-line interface.

use std::path::PathBuf;
use std::process::ExitCode;

use agentograph_core::config::{Config, OutputFormat};
use agentograph_core::{Framework, Pipeline};
use clap::{Parser, Subcommand};

mod batch;

#[derive(Parser)]
#[command(name = "agentograph")]
#[command(about = "Extract agentic AI patterns into an ontology-aligned resource graph")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert analysis documents (.txt) into resource graphs
    Convert {
        /// Directory containing analysis documents
        input: PathBuf,

        /// Directory to write graph documents to
        output: PathBuf,

        /// Output format: json, turtle or both
        #[arg(long)]
        format: Option<String>,
    },

    /// Extract resource graphs directly from framework source files
    Extract {
        /// Directory containing framework source trees (autogen/, crewai/, ...)
        input: PathBuf,

        /// Directory to write graph documents to
        output: PathBuf,

        /// Force a framework instead of inferring it from subdirectory names
        #[arg(long)]
        framework: Option<String>,

        /// Output format: json, turtle or both
        #[arg(long)]
        format: Option<String>,
    },

    /// Write a default agentograph.toml to the current directory
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Warning: failed to load config, using defaults: {err}");
            Config::default()
        }
    };

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
        } => {
            if let Err(code) = apply_format(&mut config, format.as_deref()) {
                return code;
            }
            let pipeline = Pipeline::new();
            match batch::convert_dir(&pipeline, &config, &input, &output) {
                Ok(stats) => {
                    stats.print_summary(&output);
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Extract {
            input,
            output,
            framework,
            format,
        } => {
            if let Err(code) = apply_format(&mut config, format.as_deref()) {
                return code;
            }
            let forced = match framework.as_deref() {
                Some(name) => match Framework::from_name(name) {
                    Some(framework) => Some(framework),
                    None => {
                        eprintln!("Error: unknown framework '{name}'");
                        return ExitCode::FAILURE;
                    }
                },
                None => None,
            };
            let pipeline = Pipeline::new();
            match batch::extract_dir(&pipeline, &config, &input, &output, forced) {
                Ok(stats) => {
                    stats.print_summary(&output);
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Init => {
            let path = PathBuf::from("agentograph.toml");
            if path.exists() {
                eprintln!("agentograph.toml already exists, not overwriting");
                return ExitCode::FAILURE;
            }
            match std::fs::write(&path, Config::default_config_string()) {
                Ok(()) => {
                    println!("Wrote {}", path.display());
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Apply the `--format` override on top of the loaded configuration.
fn apply_format(config: &mut Config, format: Option<&str>) -> Result<(), ExitCode> {
    if let Some(raw) = format {
        match raw.parse::<OutputFormat>() {
            Ok(parsed) => config.output.format = parsed,
            Err(err) => {
                eprintln!("Error: {err}");
                return Err(ExitCode::FAILURE);
            }
        }
    }
    Ok(())
}
