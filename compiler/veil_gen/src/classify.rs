//! Type classifier.
//!
//! Assigns exactly one [`Category`] to every (rule, type) pair. The tests
//! are an ordered priority list and the first match wins, so the result is a
//! pure function of the descriptor and the configuration.

use rustc_hash::FxHashSet;

use veil_ir::{Category, Config, PrimitiveKind, Rule, TypeDescriptor, TypeName, STRING_TYPE};

/// Classifier over one configuration.
///
/// Immutable after construction; the pipeline shares one across worker
/// threads.
pub struct TypeClassifier<'cfg> {
    config: &'cfg Config,
    to_string: FxHashSet<&'cfg TypeName>,
    numerical: FxHashSet<&'cfg TypeName>,
}

impl<'cfg> TypeClassifier<'cfg> {
    pub fn new(config: &'cfg Config) -> Self {
        Self {
            config,
            to_string: config.to_string_types().iter().collect(),
            numerical: config.numerical_types().iter().collect(),
        }
    }

    /// Whether native-serialization-only categories are available.
    #[inline]
    pub fn native_enabled(&self) -> bool {
        self.config.native_serialization()
    }

    /// Classify `ty` under `rule`.
    ///
    /// Categories do not currently depend on the rule.
    pub fn classify(&self, rule: &Rule, ty: &TypeDescriptor) -> Category {
        let category = self.classify_descriptor(ty);
        tracing::debug!(rule = %rule.name, ty = %ty.name, %category, "classified");
        category
    }

    fn classify_descriptor(&self, ty: &TypeDescriptor) -> Category {
        let native = self.native_enabled();
        let name = ty.name.as_str();

        if ty.is_enum() {
            return Category::Enum;
        }
        if PrimitiveKind::from_name(name).is_some() {
            return Category::PrimitiveWrapper;
        }
        if name == STRING_TYPE {
            return Category::String;
        }
        if self.to_string.contains(&ty.name) {
            return Category::ToStringSerializable;
        }
        // Native-gated: without native serialization these fall through to
        // NoOp, never to Custom.
        if self.numerical.contains(&ty.name) {
            return if native {
                Category::Numerical
            } else {
                Category::NoOp
            };
        }
        if ty.is_map_like() {
            return Category::Map;
        }
        if ty.is_collection_like() {
            return Category::Collection;
        }
        if ty.is_array() {
            return match ty.primitive_element() {
                None => Category::ObjectArray,
                Some(_) if native => Category::PrimitiveArray,
                Some(_) => Category::NoOp,
            };
        }
        if ty.is_concrete_public() {
            return Category::Custom;
        }
        Category::NoOp
    }
}
