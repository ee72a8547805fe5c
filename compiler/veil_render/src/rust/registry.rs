//! `registry.rs`: handler ids, initializer procedures and `init_registry`.

use veil_ir::{Artifacts, Fallback, Initializer, Insertion};

use super::string_literal;
use crate::writer::SourceWriter;

const PROCEDURE_SIGNATURE: &str =
    "(builder: &mut RegistryBuilder, ids: &Handlers) -> Result<(), LoadError>";

pub(super) fn emit(w: &mut SourceWriter, artifacts: &Artifacts) {
    let chained = matches!(artifacts.initializer, Initializer::Chained { .. });
    if chained {
        w.writeln("#![allow(non_snake_case)]");
        w.newline();
    }
    w.writeln("use veil_rt::{LoadError, Registry, RegistryBuilder, HandlerId};");
    w.newline();
    w.writeln("use super::handlers;");
    w.newline();

    w.writeln("/// Registered handler ids, one per accessor.");
    w.block("pub struct Handlers", |w| {
        for handler in &artifacts.handlers {
            w.writeln(&format!("pub {}: HandlerId,", handler.accessor));
        }
    });
    w.newline();

    w.writeln("/// Build the masking registry. Call once and share the result.");
    w.block("pub fn init_registry() -> Result<Registry, LoadError>", |w| {
        w.writeln("let mut builder = RegistryBuilder::new();");
        w.statement_block("let ids = Handlers", |w| {
            for handler in &artifacts.handlers {
                w.writeln(&format!(
                    "{}: builder.handler({}, Box::new(handlers::{}))?,",
                    handler.accessor,
                    string_literal(&handler.accessor),
                    handler.name
                ));
            }
        });
        for entry in &artifacts.dispatch {
            w.writeln(&format!(
                "builder.rule({}, {})?;",
                string_literal(entry.rule.as_str()),
                fallback(entry.fallback)
            ));
        }
        match &artifacts.initializer {
            Initializer::Inline(statements) => {
                for statement in statements {
                    insertion(w, artifacts, statement);
                }
            }
            Initializer::Chained { wrapper, .. } => {
                for name in wrapper {
                    w.writeln(&format!("{name}(&mut builder, &ids)?;"));
                }
            }
        }
        w.writeln("Ok(builder.build())");
    });

    for procedure in artifacts.initializer.procedures() {
        w.newline();
        w.block(&format!("fn {}{PROCEDURE_SIGNATURE}", procedure.name), |w| {
            for statement in &procedure.body {
                insertion(w, artifacts, statement);
            }
            w.writeln("Ok(())");
        });
    }
}

fn insertion(w: &mut SourceWriter, artifacts: &Artifacts, statement: &Insertion) {
    let handler = match artifacts.handler(statement.handler) {
        Some(handler) => format!("ids.{}", handler.accessor),
        None => format!("HandlerId::new({})", statement.handler.raw()),
    };
    w.writeln(&format!(
        "builder.insert({}, {}, {handler})?;",
        string_literal(statement.rule.as_str()),
        string_literal(statement.ty.as_str()),
    ));
}

fn fallback(fallback: Option<Fallback>) -> &'static str {
    match fallback {
        None => "None",
        Some(Fallback::Passthrough) => "Some(veil_rt::Fallback::Passthrough)",
        Some(Fallback::Nullify) => "Some(veil_rt::Fallback::Nullify)",
    }
}
