use veil_ir::{HandlerId, RuleName, TypeName};

/// Failure while routing a value to its handler.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
    #[error("no handler for `{ty}` under rule `{rule}`")]
    Unresolved { rule: RuleName, ty: TypeName },
}

/// Failure while populating a registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("rule `{0}` is declared twice")]
    DuplicateRule(RuleName),
    #[error("binding refers to undeclared rule `{0}`")]
    UnknownRule(RuleName),
    #[error("binding refers to unknown handler {0:?}")]
    UnknownHandler(HandlerId),
    #[error("`{ty}` is bound twice under rule `{rule}`")]
    DuplicateBinding { rule: RuleName, ty: TypeName },
    #[error("handler accessor `{0}` is used twice")]
    DuplicateAccessor(String),
}
