//! `dispatch.rs`: one entry point per rule.

use veil_ir::Artifacts;

use super::string_literal;
use crate::writer::SourceWriter;

pub(super) fn emit(w: &mut SourceWriter, artifacts: &Artifacts) {
    w.writeln("use veil_rt::{DispatchError, Registry, Value};");
    for entry in &artifacts.dispatch {
        let rule = string_literal(entry.rule.as_str());
        w.newline();
        match artifacts.rule(entry.rule.as_str()) {
            Some(registry) => w.writeln(&format!(
                "/// Mask `value` under rule `{}` (policy `{}`).",
                entry.rule, registry.policy
            )),
            None => w.writeln(&format!("/// Mask `value` under rule `{}`.", entry.rule)),
        }
        w.block(
            &format!(
                "pub fn {}(registry: &Registry, value: Value) -> Result<Value, DispatchError>",
                entry.function
            ),
            |w| {
                if artifacts.debug {
                    w.writeln(&format!(
                        "tracing::trace!(rule = {rule}, ty = value.type_name(), \"dispatch\");"
                    ));
                }
                w.writeln(&format!("registry.apply({rule}, value)"));
            },
        );
    }
}
