//! Generation errors.

use veil_ir::{CompareOp, ConfigError, TypeName};

use crate::discovery::DiscoveryError;

/// A field operation that cannot be expressed for the field's traits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("operator `{op}` needs a primitive or orderable operand")]
pub struct UnsupportedComparison {
    pub op: CompareOp,
}

/// Failures that abort a generation run. No artifacts are emitted after any
/// of these.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("type discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("unsupported comparison on `{ty}.{field}`: {source}")]
    UnsupportedComparison {
        ty: TypeName,
        field: String,
        #[source]
        source: UnsupportedComparison,
    },
}
