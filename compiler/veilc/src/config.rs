//! TOML configuration loading.
//!
//! ```toml
//! namespace = "acme::masks"
//! scan = ["acme"]
//! native_serialization = true
//!
//! [[rules]]
//! name = "public"
//! policy = "redact"
//! fallback = "passthrough"
//! ```

use std::path::Path;

use veil_ir::{Config, ConfigFile};

use crate::CliError;

/// Parse configuration text without validating it.
pub fn parse_config(text: &str, path: &Path) -> Result<ConfigFile, CliError> {
    toml::from_str(text).map_err(|source| CliError::ParseConfig {
        path: path.to_owned(),
        source,
    })
}

/// Read and validate the configuration at `path`.
pub fn load_config(path: &Path) -> Result<Config, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })?;
    let config = Config::from_file(parse_config(&text, path)?)?;
    tracing::debug!(path = %path.display(), rules = config.rules().len(), "loaded configuration");
    Ok(config)
}
