//! Generated artifacts.
//!
//! Generation produces structured values, not source text. A renderer turns
//! [`Artifacts`] into a concrete target representation; the runtime can also
//! load them directly. Keeping the two apart means classification and
//! assembly never depend on the output format.

use std::fmt;

use crate::{Category, CompareOp, Fallback, Literal, RuleName, TypeName};

/// Index of a handler within [`Artifacts::handlers`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct HandlerId(u32);

impl HandlerId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// Code shape of a field comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OperationFragment {
    /// `(lhs <op> rhs)`.
    Direct(CompareOp),
    /// `(lhs.eq(&rhs))`, or `(!lhs.eq(&rhs))` when negated.
    Structural { negated: bool },
    /// Three-way comparison checked against zero with the operator's sign.
    ThreeWay(CompareOp),
}

impl OperationFragment {
    /// Render the fragment with the given operand expressions.
    pub fn render(self, lhs: &str, rhs: &str) -> String {
        match self {
            Self::Direct(op) => format!("({lhs} {op} {rhs})"),
            Self::Structural { negated: false } => format!("({lhs}.eq(&{rhs}))"),
            Self::Structural { negated: true } => format!("(!{lhs}.eq(&{rhs}))"),
            Self::ThreeWay(op) => {
                format!("({lhs}.three_way(&{rhs}).is_some_and(|ord| ord {op} 0))")
            }
        }
    }
}

/// One condition under which a field is masked.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Guard {
    pub op: CompareOp,
    pub operand: Literal,
    pub fragment: OperationFragment,
}

/// When a field is masked: always, or when any guard holds.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaskPlan {
    pub always: bool,
    pub guards: Vec<Guard>,
}

/// What a custom handler does with one field.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FieldAction {
    /// Primitive leaf with no directive for the rule.
    Keep,
    /// Dispatch the nested value under the same rule.
    Descend,
    /// Replace with null when the plan applies.
    Mask(MaskPlan),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldPlan {
    pub name: String,
    pub ty: TypeName,
    pub action: FieldAction,
}

/// Field-level transformation synthesized for one concrete type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CustomPlan {
    pub ty: TypeName,
    pub fields: Vec<FieldPlan>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum HandlerKind {
    /// Shared handler whose behavior is fixed by its category.
    Builtin(Category),
    /// Per-type handler.
    Custom(CustomPlan),
}

impl HandlerKind {
    pub fn category(&self) -> Category {
        match self {
            Self::Builtin(category) => *category,
            Self::Custom(_) => Category::Custom,
        }
    }
}

/// A generated transformation unit bound to one rule.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Handler {
    pub id: HandlerId,
    pub rule: RuleName,
    /// UpperCamelCase type name of the handler.
    pub name: String,
    /// snake_case accessor on the registry container.
    pub accessor: String,
    pub kind: HandlerKind,
}

/// Registry population statement: under `rule`, type `ty` is served by `handler`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Insertion {
    pub rule: RuleName,
    pub ty: TypeName,
    pub handler: HandlerId,
}

/// A named group of statements.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Procedure<T> {
    pub name: String,
    pub body: Vec<T>,
}

/// An initialization unit: either one block, or bounded procedures chained
/// by a wrapper that calls them in order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Initializer<T> {
    Inline(Vec<T>),
    Chained {
        procedures: Vec<Procedure<T>>,
        /// Procedure names in call order.
        wrapper: Vec<String>,
    },
}

impl<T> Initializer<T> {
    /// Statements in the order running the initializer performs them.
    pub fn statements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        match self {
            Self::Inline(body) => Box::new(body.iter()),
            Self::Chained {
                procedures,
                wrapper,
            } => Box::new(
                wrapper
                    .iter()
                    .filter_map(|name| procedures.iter().find(|p| &p.name == name))
                    .flat_map(|p| p.body.iter()),
            ),
        }
    }

    /// Procedures, empty for an inline initializer.
    pub fn procedures(&self) -> &[Procedure<T>] {
        match self {
            Self::Inline(_) => &[],
            Self::Chained { procedures, .. } => procedures,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Inline(body) => body.len(),
            Self::Chained { procedures, .. } => procedures.iter().map(|p| p.body.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-rule view of the registry container.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RuleRegistry {
    pub rule: RuleName,
    pub policy: String,
    /// Handlers owned for this rule, deduplicated, in creation order.
    pub handlers: Vec<HandlerId>,
}

/// Per-rule lookup-and-invoke routine.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DispatchEntry {
    pub rule: RuleName,
    /// Name of the generated entry function (`apply_<rule>`).
    pub function: String,
    /// Applied when no registry entry matches the instance's type.
    pub fallback: Option<Fallback>,
}

/// Everything one generation run produces.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Artifacts {
    pub namespace: String,
    pub debug: bool,
    pub handlers: Vec<Handler>,
    pub rules: Vec<RuleRegistry>,
    pub initializer: Initializer<Insertion>,
    pub dispatch: Vec<DispatchEntry>,
}

impl Artifacts {
    pub fn handler(&self, id: HandlerId) -> Option<&Handler> {
        self.handlers.get(id.index())
    }

    pub fn rule(&self, rule: &str) -> Option<&RuleRegistry> {
        self.rules.iter().find(|r| r.rule.as_str() == rule)
    }

    /// Handlers owned by `rule`, in creation order.
    pub fn handlers_for<'a>(&'a self, rule: &str) -> impl Iterator<Item = &'a Handler> + 'a {
        self.rule(rule)
            .into_iter()
            .flat_map(|r| r.handlers.iter())
            .filter_map(move |&id| self.handler(id))
    }

    /// Registry bindings for `rule`, in initialization order.
    pub fn bindings_for<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Insertion> + 'a {
        self.initializer
            .statements()
            .filter(move |ins| ins.rule.as_str() == rule)
    }

    /// The handler bound to `ty` under `rule`, if any.
    pub fn resolve(&self, rule: &str, ty: &str) -> Option<&Handler> {
        self.bindings_for(rule)
            .find(|ins| ins.ty.as_str() == ty)
            .and_then(|ins| self.handler(ins.handler))
    }

    pub fn dispatch_for(&self, rule: &str) -> Option<&DispatchEntry> {
        self.dispatch.iter().find(|d| d.rule.as_str() == rule)
    }
}
