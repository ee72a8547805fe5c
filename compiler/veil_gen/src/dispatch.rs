//! Dispatch entry generation.

use veil_ir::{Config, DispatchEntry, Rule};

/// Prefix of every generated dispatch function.
pub const ENTRY_PREFIX: &str = "apply_";

/// Build the dispatch entry for `rule`.
///
/// The rule's own fallback wins over the configuration-wide one. Without
/// either, a lookup miss at run time is an error.
pub fn entry(config: &Config, rule: &Rule) -> DispatchEntry {
    DispatchEntry {
        rule: rule.name.clone(),
        function: format!("{ENTRY_PREFIX}{}", rule.name),
        fallback: rule.fallback.or(config.fallback()),
    }
}
