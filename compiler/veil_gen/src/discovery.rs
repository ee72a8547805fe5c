//! Type discovery contract.
//!
//! Enumerating candidate types is an external concern. The generator only
//! needs an ordered list of descriptors for the configured scan locations;
//! that order is the discovery order generation follows.

use std::path::PathBuf;

use rustc_hash::FxHashSet;

use veil_ir::{TypeDescriptor, TypeName};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse `{path}`: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("type `{0}` was discovered more than once")]
    DuplicateType(TypeName),
}

/// Source of type descriptors.
pub trait TypeDiscovery {
    /// Descriptors for every type inside one of the `scan` namespaces.
    fn discover(&self, scan: &[String]) -> Result<Vec<TypeDescriptor>, DiscoveryError>;
}

/// Whether `ty` lives in any of the `scan` namespaces.
pub fn in_scan(ty: &TypeDescriptor, scan: &[String]) -> bool {
    scan.iter().any(|ns| ty.name.is_within(ns))
}

/// Reject a descriptor list that names the same type twice.
pub fn ensure_unique(types: &[TypeDescriptor]) -> Result<(), DiscoveryError> {
    let mut seen = FxHashSet::default();
    for ty in types {
        if !seen.insert(&ty.name) {
            return Err(DiscoveryError::DuplicateType(ty.name.clone()));
        }
    }
    Ok(())
}

/// In-memory discovery over a fixed descriptor list.
#[derive(Clone, Debug, Default)]
pub struct StaticDiscovery {
    types: Vec<TypeDescriptor>,
}

impl StaticDiscovery {
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        Self { types }
    }
}

impl TypeDiscovery for StaticDiscovery {
    fn discover(&self, scan: &[String]) -> Result<Vec<TypeDescriptor>, DiscoveryError> {
        let found: Vec<_> = self
            .types
            .iter()
            .filter(|ty| in_scan(ty, scan))
            .cloned()
            .collect();
        ensure_unique(&found)?;
        Ok(found)
    }
}
