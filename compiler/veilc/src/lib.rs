//! Veil driver.
//!
//! Loads TOML configuration, discovers types from JSON manifests, runs the
//! generator and writes the rendered sources.

pub mod commands;
pub mod config;
mod error;
pub mod manifest;
pub mod sink;

use std::sync::Once;

pub use config::load_config;
pub use error::{CliError, EmitError};
pub use manifest::ManifestDiscovery;
pub use sink::FsSink;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber once.
///
/// `RUST_LOG` wins when set. Otherwise the filter is `debug` when `debug`
/// is true and `warn` when it is not.
pub fn init_tracing(debug: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let default = if debug { "debug" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let tree = tracing_tree::HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true);
        // A subscriber installed by the embedding process takes precedence.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tree)
            .try_init();
    });
}
