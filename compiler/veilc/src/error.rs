use std::path::PathBuf;

use veil_gen::{GenError, RunError};
use veil_ir::ConfigError;

/// Failure writing generated output.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize artifacts: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any failure of a driver command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration file `{path}`: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid artifacts file `{path}`: {source}")]
    ParseArtifacts {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generate(#[from] GenError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}

impl From<RunError<EmitError>> for CliError {
    fn from(err: RunError<EmitError>) -> Self {
        match err {
            RunError::Generate(err) => CliError::Generate(err),
            RunError::Emit(err) => CliError::Emit(err),
        }
    }
}
