//! Handler generation.
//!
//! Shared categories get one handler per rule, created on first request and
//! reused afterwards. Custom types get a handler per (rule, type) whose plan
//! walks the type's declared fields. Every handler is registered with the
//! assembler the moment it is created.

use heck::ToUpperCamelCase;

use veil_ir::{
    Category, CustomPlan, FieldAction, FieldDescriptor, FieldPlan, FieldTraits, Guard, HandlerId,
    HandlerKind, MaskPlan, Rule, TypeDescriptor,
};

use crate::error::GenError;
use crate::field_ops;
use crate::registry::RegistryAssembler;

/// The shared handler for `(rule, category)`, generating it on first use.
pub fn shared(assembler: &mut RegistryAssembler, rule: &Rule, category: Category) -> HandlerId {
    debug_assert!(
        category.is_shared(),
        "custom handlers are per type, use `custom`"
    );
    if let Some(existing) = assembler.shared_handler(&rule.name, category) {
        return existing;
    }
    assembler.register(&rule.name, category.stem(), HandlerKind::Builtin(category))
}

/// Synthesize the field-level plan for a custom type under `rule`.
///
/// Pure over its inputs, so the pipeline runs it in parallel. Fails when a
/// conditional directive needs a comparison the field's traits cannot
/// support.
pub fn plan_custom(rule: &Rule, ty: &TypeDescriptor) -> Result<CustomPlan, GenError> {
    let fields = ty
        .fields
        .iter()
        .map(|field| {
            Ok(FieldPlan {
                name: field.name.clone(),
                ty: field.ty.clone(),
                action: field_action(rule, ty, field)?,
            })
        })
        .collect::<Result<Vec<_>, GenError>>()?;

    Ok(CustomPlan {
        ty: ty.name.clone(),
        fields,
    })
}

fn field_action(
    rule: &Rule,
    owner: &TypeDescriptor,
    field: &FieldDescriptor,
) -> Result<FieldAction, GenError> {
    let mut directives = field.directives_for(&rule.name).peekable();
    if directives.peek().is_none() {
        return Ok(if field.traits.contains(FieldTraits::PRIMITIVE) {
            FieldAction::Keep
        } else {
            FieldAction::Descend
        });
    }

    let mut plan = MaskPlan::default();
    for directive in directives {
        let Some(condition) = &directive.condition else {
            plan.always = true;
            continue;
        };
        let fragment = field_ops::synthesize(condition.op, field.traits).map_err(|source| {
            GenError::UnsupportedComparison {
                ty: owner.name.clone(),
                field: field.name.clone(),
                source,
            }
        })?;
        plan.guards.push(Guard {
            op: condition.op,
            operand: condition.operand.clone(),
            fragment,
        });
    }
    Ok(FieldAction::Mask(plan))
}

/// Register the custom handler for `plan` under `rule`.
///
/// Distinct types always get distinct handlers; asking twice for the same
/// (rule, type) returns the first one.
pub fn custom(assembler: &mut RegistryAssembler, rule: &Rule, plan: CustomPlan) -> HandlerId {
    if let Some(existing) = assembler.custom_handler(&rule.name, &plan.ty) {
        return existing;
    }
    let stem = plan.ty.simple_name().to_upper_camel_case();
    assembler.register(&rule.name, &stem, HandlerKind::Custom(plan))
}
