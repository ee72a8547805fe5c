//! JSON manifest discovery.
//!
//! A manifest lists type descriptors as produced by whatever scanned the
//! source crates:
//!
//! ```json
//! { "types": [ { "name": "acme::User", "flags": "PUBLIC", "fields": [] } ] }
//! ```
//!
//! Manifests are read in the order given; within a manifest, declaration
//! order is kept. Together that is the discovery order.

use std::path::{Path, PathBuf};

use veil_gen::discovery::{ensure_unique, in_scan};
use veil_gen::{DiscoveryError, TypeDiscovery};
use veil_ir::TypeDescriptor;

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    types: Vec<TypeDescriptor>,
}

/// Discovery over one or more manifest files.
#[derive(Clone, Debug)]
pub struct ManifestDiscovery {
    paths: Vec<PathBuf>,
}

impl ManifestDiscovery {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    fn read(path: &Path) -> Result<Vec<TypeDescriptor>, DiscoveryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
            path: path.to_owned(),
            source,
        })?;
        let manifest: Manifest =
            serde_json::from_str(&text).map_err(|err| DiscoveryError::Parse {
                path: path.to_owned(),
                message: err.to_string(),
            })?;
        Ok(manifest.types)
    }
}

impl TypeDiscovery for ManifestDiscovery {
    fn discover(&self, scan: &[String]) -> Result<Vec<TypeDescriptor>, DiscoveryError> {
        let mut found = Vec::new();
        for path in &self.paths {
            let types = Self::read(path)?;
            let before = found.len();
            found.extend(types.into_iter().filter(|ty| in_scan(ty, scan)));
            tracing::debug!(
                path = %path.display(),
                kept = found.len() - before,
                "read manifest"
            );
        }
        ensure_unique(&found)?;
        Ok(found)
    }
}
