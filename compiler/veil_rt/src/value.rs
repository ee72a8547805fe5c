//! Runtime values seen by masking handlers.
//!
//! Every non-null value carries the identity of its type, which is what
//! dispatch looks up. Scalars derive it from their kind; composite values
//! store it explicitly.
//!
//! # Comparison
//!
//! Integers and floats compare numerically across widths. A `char` compares
//! equal to a one-character string, so conditions written against string
//! literals work on `char` fields. Values of unrelated shapes are unordered.

use std::cmp::Ordering;
use std::fmt;

use veil_ir::{Literal, PrimitiveKind, TypeName, STRING_TYPE};

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    /// Integer of the given primitive width.
    Int { ty: PrimitiveKind, value: i64 },
    /// Float of the given primitive width.
    Float { ty: PrimitiveKind, value: f64 },
    Str(String),
    /// Instance of a type serialized through its textual form.
    Text { ty: TypeName, text: String },
    /// Enum instance, identified by variant name.
    Enum { ty: TypeName, variant: String },
    /// Array or collection.
    Seq { ty: TypeName, items: Vec<Value> },
    /// Map-like instance, entries in insertion order.
    Map { ty: TypeName, entries: Vec<(Value, Value)> },
    /// Instance of a custom type.
    Object(Object),
}

/// Instance of a custom type: its identity and named fields in declaration
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub ty: TypeName,
    pub fields: Vec<(String, Value)>,
}

impl Object {
    pub fn new(ty: impl Into<TypeName>) -> Self {
        Object {
            ty: ty.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(field, value)| (field == name).then_some(value))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find_map(|(field, value)| (field == name).then_some(value))
    }
}

impl Value {
    pub fn text(ty: impl Into<TypeName>, text: impl Into<String>) -> Self {
        Value::Text {
            ty: ty.into(),
            text: text.into(),
        }
    }

    pub fn enumeration(ty: impl Into<TypeName>, variant: impl Into<String>) -> Self {
        Value::Enum {
            ty: ty.into(),
            variant: variant.into(),
        }
    }

    pub fn seq(ty: impl Into<TypeName>, items: Vec<Value>) -> Self {
        Value::Seq {
            ty: ty.into(),
            items,
        }
    }

    pub fn map(ty: impl Into<TypeName>, entries: Vec<(Value, Value)>) -> Self {
        Value::Map {
            ty: ty.into(),
            entries,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type identity used for registry lookup.
    ///
    /// `null` has no type; it reports `"null"` and is never looked up.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => PrimitiveKind::Bool.name(),
            Value::Char(_) => PrimitiveKind::Char.name(),
            Value::Int { ty, .. } | Value::Float { ty, .. } => ty.name(),
            Value::Str(_) => STRING_TYPE,
            Value::Text { ty, .. }
            | Value::Enum { ty, .. }
            | Value::Seq { ty, .. }
            | Value::Map { ty, .. }
            | Value::Object(Object { ty, .. }) => ty.as_str(),
        }
    }

    /// Three-way comparison as a signed integer: negative, zero or
    /// positive. `None` when the values are unordered.
    pub fn three_way(&self, other: &Value) -> Option<i8> {
        self.partial_cmp(other).map(|ord| ord as i8)
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            #[expect(
                clippy::cast_precision_loss,
                reason = "mixed int/float comparison is approximate by definition"
            )]
            Value::Int { value, .. } => Some(*value as f64),
            Value::Float { value, .. } => Some(*value),
            _ => None,
        }
    }

    fn as_single_char(text: &str) -> Option<char> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Text { ty: t1, text: a }, Value::Text { ty: t2, text: b }) => t1 == t2 && a == b,
            (Value::Enum { ty: t1, variant: a }, Value::Enum { ty: t2, variant: b }) => {
                t1 == t2 && a == b
            }
            (Value::Seq { ty: t1, items: a }, Value::Seq { ty: t2, items: b }) => t1 == t2 && a == b,
            (Value::Map { ty: t1, entries: a }, Value::Map { ty: t2, entries: b }) => {
                t1 == t2 && a == b
            }
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => self.partial_cmp(other) == Some(Ordering::Equal),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Char(a), Value::Str(b)) => Value::as_single_char(b).map(|b| a.cmp(&b)),
            (Value::Str(a), Value::Char(b)) => Value::as_single_char(a).map(|a| a.cmp(b)),
            (Value::Int { value: a, .. }, Value::Int { value: b, .. }) => Some(a.cmp(b)),
            _ => {
                let (a, b) = (self.as_f64()?, other.as_f64()?);
                a.partial_cmp(&b)
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c:?}"),
            Value::Int { ty, value } => write!(f, "{value}_{ty}"),
            Value::Float { ty, value } => write!(f, "{value}_{ty}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Text { ty, text } => write!(f, "{ty}({text:?})"),
            Value::Enum { ty, variant } => write!(f, "{ty}::{variant}"),
            Value::Seq { ty, items } => {
                write!(f, "{ty}")?;
                f.debug_list().entries(items).finish()
            }
            Value::Map { ty, entries } => {
                write!(f, "{ty}")?;
                f.debug_map()
                    .entries(entries.iter().map(|(k, v)| (k, v)))
                    .finish()
            }
            Value::Object(object) => {
                let mut s = f.debug_struct(object.ty.as_str());
                for (name, value) in &object.fields {
                    s.field(name, value);
                }
                s.finish()
            }
        }
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

macro_rules! int_from {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Int { ty: PrimitiveKind::$kind, value: i64::from(value) }
                }
            }
        )*
    };
}

int_from!(i8 => I8, i16 => I16, i32 => I32, i64 => I64);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float {
            ty: PrimitiveKind::F32,
            value: f64::from(value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float {
            ty: PrimitiveKind::F64,
            value,
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(i) => Value::from(*i),
            Literal::Float(x) => Value::from(*x),
            Literal::Str(s) => Value::Str(s.clone()),
        }
    }
}
