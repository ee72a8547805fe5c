//! Classification categories.

use std::fmt;

/// The handling bucket for a (rule, type) pair.
///
/// Every category except [`Custom`](Category::Custom) is served by one
/// shared handler per rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Category {
    Enum,
    PrimitiveWrapper,
    String,
    ToStringSerializable,
    Numerical,
    Map,
    Collection,
    ObjectArray,
    PrimitiveArray,
    /// User-defined type with a synthesized field-level handler.
    Custom,
    /// Returns its input unchanged.
    NoOp,
}

impl Category {
    /// Whether one handler per rule serves every type in this category.
    #[inline]
    pub const fn is_shared(self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Whether this category only exists with native serialization enabled.
    #[inline]
    pub const fn is_native_gated(self) -> bool {
        matches!(self, Self::Numerical | Self::PrimitiveArray)
    }

    /// UpperCamelCase stem used when naming generated handlers.
    pub const fn stem(self) -> &'static str {
        match self {
            Self::Enum => "Enum",
            Self::PrimitiveWrapper => "PrimitiveWrapper",
            Self::String => "String",
            Self::ToStringSerializable => "ToString",
            Self::Numerical => "Numerical",
            Self::Map => "Map",
            Self::Collection => "Collection",
            Self::ObjectArray => "ObjectArray",
            Self::PrimitiveArray => "PrimitiveArray",
            Self::Custom => "Custom",
            Self::NoOp => "NoOp",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Enum => "ENUM",
            Self::PrimitiveWrapper => "PRIMITIVE_WRAPPER",
            Self::String => "STRING",
            Self::ToStringSerializable => "TO_STRING_SERIALIZABLE",
            Self::Numerical => "NUMERICAL",
            Self::Map => "MAP",
            Self::Collection => "COLLECTION",
            Self::ObjectArray => "OBJECT_ARRAY",
            Self::PrimitiveArray => "PRIMITIVE_ARRAY",
            Self::Custom => "CUSTOM",
            Self::NoOp => "NO_OP",
        };
        f.write_str(label)
    }
}
