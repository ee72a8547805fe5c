//! Field operation synthesis.
//!
//! Picks the code shape for comparing a field against a literal, based on
//! the field's semantic traits. Pure: one (operator, traits) pair always maps
//! to the same fragment or the same error.

use veil_ir::{CompareOp, FieldTraits, OperationFragment};

use crate::error::UnsupportedComparison;

/// Select the fragment for `field <op> literal`.
///
/// - Equality: primitive or equatable fields compare directly; anything else
///   goes through a structural-equality call.
/// - Ordering: primitive fields use the relational operator directly;
///   orderable fields use a three-way comparison against zero; anything else
///   is rejected here, at generation time.
pub fn synthesize(
    op: CompareOp,
    traits: FieldTraits,
) -> Result<OperationFragment, UnsupportedComparison> {
    if !op.is_ordering() {
        return Ok(
            if traits.intersects(FieldTraits::PRIMITIVE | FieldTraits::EQUATABLE) {
                OperationFragment::Direct(op)
            } else {
                OperationFragment::Structural {
                    negated: op == CompareOp::Ne,
                }
            },
        );
    }
    if traits.contains(FieldTraits::PRIMITIVE) {
        Ok(OperationFragment::Direct(op))
    } else if traits.contains(FieldTraits::ORDERABLE) {
        Ok(OperationFragment::ThreeWay(op))
    } else {
        Err(UnsupportedComparison { op })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ORDERING: [CompareOp; 4] = [CompareOp::Gt, CompareOp::Ge, CompareOp::Lt, CompareOp::Le];

    #[test]
    fn operator_kinds() {
        assert!(ORDERING.into_iter().all(CompareOp::is_ordering));
        assert!(!CompareOp::Eq.is_ordering());
        assert!(!CompareOp::Ne.is_ordering());
    }

    #[test]
    fn equality_on_equatable_is_direct() {
        for traits in [FieldTraits::PRIMITIVE, FieldTraits::EQUATABLE] {
            assert_eq!(
                synthesize(CompareOp::Eq, traits),
                Ok(OperationFragment::Direct(CompareOp::Eq))
            );
            assert_eq!(
                synthesize(CompareOp::Ne, traits),
                Ok(OperationFragment::Direct(CompareOp::Ne))
            );
        }
    }

    #[test]
    fn equality_on_plain_field_is_structural() {
        assert_eq!(
            synthesize(CompareOp::Eq, FieldTraits::empty()),
            Ok(OperationFragment::Structural { negated: false })
        );
        assert_eq!(
            synthesize(CompareOp::Ne, FieldTraits::ORDERABLE),
            Ok(OperationFragment::Structural { negated: true })
        );
    }

    #[test]
    fn ordering_prefers_direct_for_primitives() {
        let traits = FieldTraits::PRIMITIVE | FieldTraits::ORDERABLE;
        for op in ORDERING {
            assert_eq!(synthesize(op, traits), Ok(OperationFragment::Direct(op)));
        }
    }

    #[test]
    fn ordering_on_orderable_uses_three_way() {
        for op in ORDERING {
            let fragment = synthesize(op, FieldTraits::ORDERABLE);
            assert_eq!(fragment, Ok(OperationFragment::ThreeWay(op)));
        }
        let Ok(fragment) = synthesize(CompareOp::Ge, FieldTraits::ORDERABLE) else {
            panic!("orderable field should support >=");
        };
        assert_eq!(
            fragment.render("field", "limit"),
            "(field.three_way(&limit).is_some_and(|ord| ord >= 0))"
        );
    }

    #[test]
    fn ordering_on_unorderable_is_rejected() {
        for op in ORDERING {
            assert_eq!(
                synthesize(op, FieldTraits::EQUATABLE),
                Err(UnsupportedComparison { op })
            );
        }
    }
}
