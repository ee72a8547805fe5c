// Generated by veil. Do not edit.
// Namespace: acme::masks

use veil_rt::{DispatchError, Registry, Value};

/// Mask `value` under rule `public` (policy `redact`).
pub fn apply_public(registry: &Registry, value: Value) -> Result<Value, DispatchError> {
    registry.apply("public", value)
}

/// Mask `value` under rule `audit` (policy `hash`).
pub fn apply_audit(registry: &Registry, value: Value) -> Result<Value, DispatchError> {
    registry.apply("audit", value)
}
