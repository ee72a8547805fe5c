//! `handlers.rs`: one unit struct per handler.

use veil_ir::{Artifacts, Category, CustomPlan, FieldAction, Handler, HandlerKind, Literal, MaskPlan};

use super::string_literal;
use crate::writer::SourceWriter;

const MASK_SIGNATURE: &str =
    "fn mask(&self, value: Value, {dispatch}: &Dispatch<'_>) -> Result<Value, DispatchError>";

pub(super) fn emit(w: &mut SourceWriter, artifacts: &Artifacts) {
    w.writeln("use veil_rt::{BuiltinHandler, Category, Dispatch, DispatchError, MaskHandler, Value};");
    for handler in &artifacts.handlers {
        w.newline();
        match &handler.kind {
            HandlerKind::Builtin(category) => builtin(w, handler, *category),
            HandlerKind::Custom(plan) => custom(w, handler, plan),
        }
    }
}

fn builtin(w: &mut SourceWriter, handler: &Handler, category: Category) {
    w.writeln(&format!("/// Rule `{}`: {category}.", handler.rule));
    w.writeln(&format!("pub struct {};", handler.name));
    w.newline();
    w.block(&format!("impl MaskHandler for {}", handler.name), |w| {
        w.block(&signature(true), |w| {
            w.writeln(&format!(
                "BuiltinHandler(Category::{category:?}).mask(value, dispatch)"
            ));
        });
    });
}

fn custom(w: &mut SourceWriter, handler: &Handler, plan: &CustomPlan) {
    let rewritten: Vec<_> = plan
        .fields
        .iter()
        .filter(|field| !matches!(field.action, FieldAction::Keep))
        .collect();
    let dispatches = rewritten.iter().any(|field| match &field.action {
        FieldAction::Descend => true,
        FieldAction::Mask(mask) => !mask.always,
        FieldAction::Keep => false,
    });

    w.writeln(&format!("/// Rule `{}`: masks `{}`.", handler.rule, plan.ty));
    w.writeln(&format!("pub struct {};", handler.name));
    w.newline();
    w.block(&format!("impl MaskHandler for {}", handler.name), |w| {
        w.block(&signature(dispatches), |w| {
            if rewritten.is_empty() {
                w.writeln("Ok(value)");
                return;
            }
            w.statement_block("let Value::Object(mut object) = value else", |w| {
                w.writeln("return Ok(value);");
            });
            for field in rewritten {
                let slot = format!(
                    "if let Some(slot) = object.get_mut({})",
                    string_literal(&field.name)
                );
                w.block(&slot, |w| match &field.action {
                    FieldAction::Mask(mask) if mask.always => w.writeln("*slot = Value::Null;"),
                    FieldAction::Mask(mask) => {
                        w.writeln("let field = std::mem::replace(slot, Value::Null);");
                        w.writeln(&format!("*slot = if {} {{", condition(mask)));
                        w.indent();
                        w.writeln("Value::Null");
                        w.dedent();
                        w.writeln("} else {");
                        w.indent();
                        w.writeln("dispatch.apply(field)?");
                        w.dedent();
                        w.writeln("};");
                    }
                    FieldAction::Descend => {
                        w.writeln("let field = std::mem::replace(slot, Value::Null);");
                        w.writeln("*slot = dispatch.apply(field)?;");
                    }
                    FieldAction::Keep => {}
                });
            }
            w.writeln("Ok(Value::Object(object))");
        });
    });
}

fn signature(uses_dispatch: bool) -> String {
    let name = if uses_dispatch { "dispatch" } else { "_dispatch" };
    MASK_SIGNATURE.replace("{dispatch}", name)
}

/// `!field.is_null() && (g1 || g2 ...)` over the plan's guards.
fn condition(mask: &MaskPlan) -> String {
    let guards: Vec<_> = mask
        .guards
        .iter()
        .map(|guard| guard.fragment.render("field", &literal(&guard.operand)))
        .collect();
    format!("!field.is_null() && ({})", guards.join(" || "))
}

/// Rust expression building a runtime value from `literal`.
pub(super) fn literal(literal: &Literal) -> String {
    match literal {
        Literal::Bool(b) => format!("Value::from({b})"),
        Literal::Int(i) => format!("Value::from({i}_i64)"),
        Literal::Float(x) if x.is_nan() => "Value::from(f64::NAN)".to_owned(),
        Literal::Float(x) if x.is_infinite() => {
            let sign = if x.is_sign_negative() { "-" } else { "" };
            format!("Value::from({sign}f64::INFINITY)")
        }
        Literal::Float(x) => format!("Value::from({x:?}_f64)"),
        Literal::Str(s) => format!("Value::from({})", string_literal(s)),
    }
}
