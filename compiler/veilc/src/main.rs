//! Veil CLI

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use veilc::commands::{self, GenerateOptions};
use veilc::{init_tracing, load_config, CliError};

#[derive(Parser)]
#[command(name = "veil")]
#[command(about = "Generate masking handlers, registries and dispatch entry points", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate Rust sources for every configured rule
    Generate {
        /// Configuration file
        #[arg(short, long, default_value = "veil.toml")]
        config: PathBuf,

        /// Type manifest (repeatable; read in order)
        #[arg(short, long = "manifest", required = true)]
        manifests: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Also write artifacts.json
        #[arg(long)]
        emit_json: bool,
    },

    /// Print the category of every discovered type
    Classify {
        /// Configuration file
        #[arg(short, long, default_value = "veil.toml")]
        config: PathBuf,

        /// Type manifest (repeatable; read in order)
        #[arg(short, long = "manifest", required = true)]
        manifests: Vec<PathBuf>,

        /// Only this rule
        #[arg(short, long)]
        rule: Option<String>,
    },

    /// Summarize an artifacts.json dump
    Inspect {
        /// Artifacts file
        artifacts: PathBuf,

        /// Show handlers and bindings of this rule
        #[arg(short, long)]
        rule: Option<String>,

        /// Resolve one type under --rule
        #[arg(short = 't', long = "type", requires = "rule")]
        ty: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match execute(cli) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
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

fn execute(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Command::Generate {
            config,
            manifests,
            out,
            emit_json,
        } => {
            let config = load_config(&config)?;
            init_tracing(cli.verbose || config.debug());
            let options = GenerateOptions {
                manifests,
                out_dir: out,
                emit_json,
            };
            commands::generate(&config, &options)
        }
        Command::Classify {
            config,
            manifests,
            rule,
        } => {
            let config = load_config(&config)?;
            init_tracing(cli.verbose || config.debug());
            commands::classify(&config, &manifests, rule.as_deref())
        }
        Command::Inspect {
            artifacts,
            rule,
            ty,
        } => {
            init_tracing(cli.verbose);
            commands::inspect(&artifacts, rule.as_deref(), ty.as_deref())
        }
    }
}
