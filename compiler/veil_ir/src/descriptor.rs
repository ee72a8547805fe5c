//! Type descriptors supplied by the discovery collaborator.
//!
//! A descriptor is an immutable snapshot of one scanned type: its identity,
//! structural flags, optional array element, and declared fields. Everything
//! downstream (classification, handler synthesis) is a pure function over
//! these values.

use std::fmt;

use bitflags::bitflags;

use crate::{PrimitiveKind, RuleName, TypeName};

bitflags! {
    /// Structural properties of a scanned type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct TypeFlags: u16 {
        /// An enumeration.
        const ENUM = 1 << 0;
        /// An array; the element type is in [`TypeDescriptor::element`].
        const ARRAY = 1 << 1;
        /// Collection-like (sequences, sets).
        const COLLECTION = 1 << 2;
        /// Map-like (key/value containers).
        const MAP = 1 << 3;
        /// Cannot be instantiated directly.
        const ABSTRACT = 1 << 4;
        /// A trait/interface type.
        const INTERFACE = 1 << 5;
        /// Visible outside its defining module.
        const PUBLIC = 1 << 6;
    }
}

bitflags! {
    /// Semantic traits of a field's declared type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct FieldTraits: u8 {
        /// A scalar value type.
        const PRIMITIVE = 1 << 0;
        /// Supports direct value equality.
        const EQUATABLE = 1 << 1;
        /// Supports a total three-way comparison.
        const ORDERABLE = 1 << 2;
    }
}

/// Comparison operator used by conditional mask directives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CompareOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl CompareOp {
    /// The operator's source symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }

    /// Whether this is one of the four ordering operators.
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Ge | Self::Lt | Self::Le)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Literal operand of a condition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A comparison against a literal: `field <op> operand`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Condition {
    pub op: CompareOp,
    pub operand: Literal,
}

/// Marks a field for masking under one rule.
///
/// Without a condition the field is always masked; with one, only when the
/// field's value satisfies it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaskDirective {
    pub rule: RuleName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

/// A declared field of a scanned type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeName,
    #[serde(default)]
    pub traits: FieldTraits,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub masks: Vec<MaskDirective>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeName>, traits: FieldTraits) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            traits,
            masks: Vec::new(),
        }
    }

    /// Always mask this field under `rule`.
    #[must_use]
    pub fn masked(mut self, rule: impl Into<RuleName>) -> Self {
        self.masks.push(MaskDirective {
            rule: rule.into(),
            condition: None,
        });
        self
    }

    /// Mask this field under `rule` when `field <op> operand` holds.
    #[must_use]
    pub fn masked_when(mut self, rule: impl Into<RuleName>, op: CompareOp, operand: Literal) -> Self {
        self.masks.push(MaskDirective {
            rule: rule.into(),
            condition: Some(Condition { op, operand }),
        });
        self
    }

    /// Directives that apply under `rule`, in declaration order.
    pub fn directives_for<'a>(
        &'a self,
        rule: &'a RuleName,
    ) -> impl Iterator<Item = &'a MaskDirective> + 'a {
        self.masks.iter().filter(move |d| &d.rule == rule)
    }
}

/// Immutable description of one scanned type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypeDescriptor {
    pub name: TypeName,
    #[serde(default)]
    pub flags: TypeFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<TypeName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<TypeName>, flags: TypeFlags) -> Self {
        Self {
            name: name.into(),
            flags,
            element: None,
            fields: Vec::new(),
        }
    }

    /// A public concrete struct-like type.
    pub fn object(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeFlags::PUBLIC)
    }

    /// A public array type whose identity is `[element]`.
    pub fn array(element: impl Into<TypeName>) -> Self {
        let element = element.into();
        Self {
            name: TypeName::array_of(element.as_str()),
            flags: TypeFlags::PUBLIC | TypeFlags::ARRAY,
            element: Some(element),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        self.flags.contains(TypeFlags::ENUM)
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.flags.contains(TypeFlags::ARRAY)
    }

    #[inline]
    pub fn is_map_like(&self) -> bool {
        self.flags.contains(TypeFlags::MAP)
    }

    #[inline]
    pub fn is_collection_like(&self) -> bool {
        self.flags.contains(TypeFlags::COLLECTION)
    }

    /// Public, and neither abstract nor an interface.
    pub fn is_concrete_public(&self) -> bool {
        self.flags.contains(TypeFlags::PUBLIC)
            && !self.flags.intersects(TypeFlags::ABSTRACT | TypeFlags::INTERFACE)
    }

    /// The primitive kind of the array element, if this is a primitive array.
    pub fn primitive_element(&self) -> Option<PrimitiveKind> {
        self.element
            .as_ref()
            .and_then(|element| PrimitiveKind::from_name(element.as_str()))
    }
}
