//! The closed set of scalar value types.
//!
//! Their names double as the primitive-wrapper identities, and `[name]`
//! forms the matching primitive-array identity.

use std::fmt;

use crate::TypeName;

/// A scalar value type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
}

impl PrimitiveKind {
    /// Every primitive kind, in registration order.
    pub const ALL: [Self; 8] = [
        Self::Bool,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F32,
        Self::F64,
        Self::Char,
    ];

    /// The identity text of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
        }
    }

    /// Look up a kind by its identity text.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Identity of the primitive wrapper type for this kind.
    pub fn type_name(self) -> TypeName {
        TypeName::new(self.name())
    }

    /// Identity of the primitive array `[kind]`.
    pub fn array_type_name(self) -> TypeName {
        TypeName::array_of(self.name())
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of the textual string type.
pub const STRING_TYPE: &str = "String";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_name("String"), None);
        assert_eq!(PrimitiveKind::from_name("u128"), None);
    }

    #[test]
    fn array_identity_wraps_name() {
        assert_eq!(PrimitiveKind::Char.array_type_name().as_str(), "[char]");
    }
}
