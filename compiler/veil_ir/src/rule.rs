//! Masking rules and dispatch fallbacks.

use crate::RuleName;

/// What dispatch does with an instance whose type has no registry entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Return the instance unchanged.
    Passthrough,
    /// Replace the instance with null.
    Nullify,
}

/// A named masking policy applied uniformly across all scanned types.
///
/// The policy itself is opaque to generation: only its stable name is
/// carried into the artifacts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rule {
    pub name: RuleName,
    pub policy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Fallback>,
}

impl Rule {
    pub fn new(name: impl Into<RuleName>, policy: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: policy.into(),
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = Some(fallback);
        self
    }
}
