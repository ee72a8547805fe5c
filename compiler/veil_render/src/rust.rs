//! Rust source rendering.
//!
//! ```text
//! mod.rs        module root and re-exports
//! handlers.rs   one `MaskHandler` impl per handler
//! registry.rs   handler ids, initializer procedures, `init_registry`
//! dispatch.rs   one `apply_<rule>` entry point per rule
//! ```
//!
//! Generated code depends on `veil_rt` only, plus `tracing` when the
//! artifacts were produced in debug mode.

mod dispatch;
mod handlers;
mod registry;

use veil_ir::Artifacts;

use crate::writer::SourceWriter;
use crate::RenderedUnit;

/// First line of every generated file.
pub const HEADER: &str = "// Generated by veil. Do not edit.";

/// Render `artifacts` to Rust source units.
pub fn render(artifacts: &Artifacts) -> Vec<RenderedUnit> {
    let units = vec![
        unit(artifacts, "mod.rs", module_root),
        unit(artifacts, "handlers.rs", handlers::emit),
        unit(artifacts, "registry.rs", registry::emit),
        unit(artifacts, "dispatch.rs", dispatch::emit),
    ];
    tracing::debug!(
        namespace = %artifacts.namespace,
        units = units.len(),
        bytes = units.iter().map(|u| u.source.len()).sum::<usize>(),
        "rendered rust sources"
    );
    units
}

fn unit(
    artifacts: &Artifacts,
    path: &str,
    emit: fn(&mut SourceWriter, &Artifacts),
) -> RenderedUnit {
    let mut w = SourceWriter::new();
    w.writeln(HEADER);
    w.writeln(&format!("// Namespace: {}", artifacts.namespace));
    w.newline();
    emit(&mut w, artifacts);
    RenderedUnit {
        path: path.to_owned(),
        source: w.take_output(),
    }
}

fn module_root(w: &mut SourceWriter, artifacts: &Artifacts) {
    w.writeln("pub mod dispatch;");
    w.writeln("pub mod handlers;");
    w.writeln("pub mod registry;");
    w.newline();
    let functions: Vec<_> = artifacts
        .dispatch
        .iter()
        .map(|entry| entry.function.as_str())
        .collect();
    w.writeln(&format!("pub use dispatch::{{{}}};", functions.join(", ")));
    w.writeln("pub use registry::{init_registry, Handlers};");
}

/// Rust string literal for `s`.
fn string_literal(s: &str) -> String {
    format!("{s:?}")
}

#[cfg(test)]
mod tests;
