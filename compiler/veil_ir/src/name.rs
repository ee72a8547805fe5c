//! Identity tokens for types and rules.
//!
//! Both are plain owned strings. Equality and hashing are by the full
//! identity, so two tokens built from the same text are interchangeable.

use std::borrow::Borrow;
use std::fmt;

macro_rules! identity_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a token from any string-like value.
            pub fn new(text: impl Into<String>) -> Self {
                Self(text.into())
            }

            /// Borrow the underlying text.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                Self::new(text)
            }
        }

        impl From<String> for $name {
            fn from(text: String) -> Self {
                Self(text)
            }
        }
    };
}

identity_token! {
    /// Fully-qualified identity of a scanned type (`acme::billing::Invoice`).
    ///
    /// Array identities are written `[elem]`.
    TypeName
}

identity_token! {
    /// Name of a masking rule. Unique within a configuration.
    RuleName
}

/// Path separator used in type identities.
pub const PATH_SEPARATOR: &str = "::";

impl TypeName {
    /// The identity of an array whose elements have type `element`.
    pub fn array_of(element: &str) -> Self {
        Self(format!("[{element}]"))
    }

    /// The last path segment (`Invoice` for `acme::billing::Invoice`).
    ///
    /// Array brackets are stripped, so `[acme::User]` yields `User`.
    pub fn simple_name(&self) -> &str {
        let trimmed = self.0.trim_start_matches('[').trim_end_matches(']');
        trimmed
            .rsplit_once(PATH_SEPARATOR)
            .map_or(trimmed, |(_, last)| last)
    }

    /// Whether this identity lives in `namespace` or one of its children.
    ///
    /// `acme::billing::Invoice` is inside `acme` and `acme::billing`, but
    /// not inside `acme::bill`.
    pub fn is_within(&self, namespace: &str) -> bool {
        match self.0.strip_prefix(namespace) {
            Some(rest) => rest.is_empty() || rest.starts_with(PATH_SEPARATOR),
            None => false,
        }
    }
}
