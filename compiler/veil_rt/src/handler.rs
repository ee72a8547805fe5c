//! Handler trait and the interpreted handlers used by [`Registry::load`].
//!
//! Generated code implements [`MaskHandler`] directly. When artifacts are
//! loaded without compiling them, [`BuiltinHandler`] and [`PlanHandler`]
//! execute the same plans by interpretation.
//!
//! [`Registry::load`]: crate::Registry::load

use veil_ir::{
    Category, CompareOp, CustomPlan, FieldAction, Guard, HandlerKind, MaskPlan, OperationFragment,
};

use crate::registry::Dispatch;
use crate::{DispatchError, Value};

/// Masks one value under a fixed rule.
///
/// Nested values are routed back through `dispatch`, which stays on the
/// rule the handler was resolved for.
pub trait MaskHandler: Send + Sync {
    fn mask(&self, value: Value, dispatch: &Dispatch<'_>) -> Result<Value, DispatchError>;
}

/// Create the interpreted handler for a handler kind.
pub fn interpret(kind: &HandlerKind) -> Box<dyn MaskHandler> {
    match kind {
        HandlerKind::Builtin(category) => Box::new(BuiltinHandler(*category)),
        HandlerKind::Custom(plan) => Box::new(PlanHandler(plan.clone())),
    }
}

/// Shared handler for a built-in category.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuiltinHandler(pub Category);

impl MaskHandler for BuiltinHandler {
    fn mask(&self, value: Value, dispatch: &Dispatch<'_>) -> Result<Value, DispatchError> {
        match (self.0, value) {
            (Category::Map, Value::Map { ty, entries }) => {
                let entries = entries
                    .into_iter()
                    .map(|(key, value)| Ok((key, dispatch.apply(value)?)))
                    .collect::<Result<_, DispatchError>>()?;
                Ok(Value::Map { ty, entries })
            }
            (Category::Collection | Category::ObjectArray, Value::Seq { ty, items }) => {
                let items = items
                    .into_iter()
                    .map(|item| dispatch.apply(item))
                    .collect::<Result<_, _>>()?;
                Ok(Value::Seq { ty, items })
            }
            (Category::ToStringSerializable, Value::Text { text, .. }) => Ok(Value::Str(text)),
            (_, value) => Ok(value),
        }
    }
}

/// Custom-type handler interpreting a field plan.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanHandler(pub CustomPlan);

impl MaskHandler for PlanHandler {
    fn mask(&self, value: Value, dispatch: &Dispatch<'_>) -> Result<Value, DispatchError> {
        let Value::Object(mut object) = value else {
            return Ok(value);
        };
        for field in &self.0.fields {
            let Some(slot) = object.get_mut(&field.name) else {
                continue;
            };
            let current = std::mem::replace(slot, Value::Null);
            *slot = match &field.action {
                FieldAction::Keep => current,
                FieldAction::Mask(plan) if masks(plan, &current) => Value::Null,
                FieldAction::Descend | FieldAction::Mask(_) => dispatch.apply(current)?,
            };
        }
        Ok(Value::Object(object))
    }
}

fn masks(plan: &MaskPlan, value: &Value) -> bool {
    plan.always || plan.guards.iter().any(|guard| guard_holds(guard, value))
}

/// Evaluate a mask condition against a field value.
///
/// A `null` field never satisfies a condition.
pub fn guard_holds(guard: &Guard, value: &Value) -> bool {
    if value.is_null() {
        return false;
    }
    let operand = Value::from(&guard.operand);
    match guard.fragment {
        OperationFragment::Structural { negated } => (*value == operand) != negated,
        OperationFragment::Direct(op) => compare(op, value, &operand),
        OperationFragment::ThreeWay(op) => value
            .three_way(&operand)
            .is_some_and(|ord| sign_holds(op, ord)),
    }
}

fn sign_holds(op: CompareOp, ord: i8) -> bool {
    match op {
        CompareOp::Eq => ord == 0,
        CompareOp::Ne => ord != 0,
        CompareOp::Gt => ord > 0,
        CompareOp::Ge => ord >= 0,
        CompareOp::Lt => ord < 0,
        CompareOp::Le => ord <= 0,
    }
}

fn compare(op: CompareOp, lhs: &Value, rhs: &Value) -> bool {
    match op {
        CompareOp::Eq => lhs == rhs,
        CompareOp::Ne => lhs != rhs,
        CompareOp::Gt => lhs > rhs,
        CompareOp::Ge => lhs >= rhs,
        CompareOp::Lt => lhs < rhs,
        CompareOp::Le => lhs <= rhs,
    }
}

#[cfg(test)]
mod tests {
    use veil_ir::Literal;

    use super::*;

    fn guard(op: CompareOp, operand: Literal, fragment: OperationFragment) -> Guard {
        Guard {
            op,
            operand,
            fragment,
        }
    }

    #[test]
    fn direct_guards_compare_numerically() {
        let under_age = guard(CompareOp::Lt, Literal::Int(18), OperationFragment::Direct(CompareOp::Lt));
        assert!(guard_holds(&under_age, &Value::from(17_i32)));
        assert!(!guard_holds(&under_age, &Value::from(18_i32)));
        assert!(!guard_holds(&under_age, &Value::Null));
    }

    #[test]
    fn structural_guards_respect_negation() {
        let is_admin = guard(
            CompareOp::Eq,
            Literal::Str("admin".into()),
            OperationFragment::Structural { negated: false },
        );
        let not_admin = guard(
            CompareOp::Ne,
            Literal::Str("admin".into()),
            OperationFragment::Structural { negated: true },
        );
        let admin = Value::from("admin");
        assert!(guard_holds(&is_admin, &admin));
        assert!(!guard_holds(&not_admin, &admin));
        assert!(guard_holds(&not_admin, &Value::from("guest")));
    }

    #[test]
    fn three_way_guards_use_sign() {
        let later = guard(
            CompareOp::Ge,
            Literal::Str("m".into()),
            OperationFragment::ThreeWay(CompareOp::Ge),
        );
        assert!(guard_holds(&later, &Value::from("m")));
        assert!(guard_holds(&later, &Value::from("z")));
        assert!(!guard_holds(&later, &Value::from("a")));
        assert!(!guard_holds(&later, &Value::from(3_i64)));
    }
}
