//! Handler registry and per-rule dispatch.
//!
//! A [`Registry`] is filled once through a [`RegistryBuilder`], either by
//! generated initializer code or by [`Registry::load`], and is read-only
//! afterwards. Lookups are by exact type identity; there is no subtype or
//! interface resolution.

use rustc_hash::FxHashMap;

use veil_ir::{Artifacts, Fallback, HandlerId, RuleName, TypeName};

use crate::handler::{interpret, MaskHandler};
use crate::{DispatchError, LoadError, Value};

struct RuleTable {
    name: RuleName,
    fallback: Option<Fallback>,
    bindings: FxHashMap<TypeName, HandlerId>,
}

/// Accumulates handlers, rules and bindings before they are frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: Vec<Box<dyn MaskHandler>>,
    accessors: FxHashMap<String, HandlerId>,
    rules: Vec<RuleTable>,
    rule_index: FxHashMap<RuleName, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler reachable under `accessor`.
    pub fn handler(
        &mut self,
        accessor: impl Into<String>,
        handler: Box<dyn MaskHandler>,
    ) -> Result<HandlerId, LoadError> {
        let accessor = accessor.into();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "handler counts never exceed u32"
        )]
        let id = HandlerId::new(self.handlers.len() as u32);
        if self.accessors.contains_key(&accessor) {
            return Err(LoadError::DuplicateAccessor(accessor));
        }
        self.accessors.insert(accessor, id);
        self.handlers.push(handler);
        Ok(id)
    }

    /// Declare a rule and the fallback its dispatch uses on a miss.
    pub fn rule(
        &mut self,
        name: impl Into<RuleName>,
        fallback: Option<Fallback>,
    ) -> Result<(), LoadError> {
        let name = name.into();
        if self.rule_index.contains_key(&name) {
            return Err(LoadError::DuplicateRule(name));
        }
        self.rule_index.insert(name.clone(), self.rules.len());
        self.rules.push(RuleTable {
            name,
            fallback,
            bindings: FxHashMap::default(),
        });
        Ok(())
    }

    /// Bind `ty` to `handler` under `rule`.
    pub fn insert(&mut self, rule: &str, ty: &str, handler: HandlerId) -> Result<(), LoadError> {
        if handler.index() >= self.handlers.len() {
            return Err(LoadError::UnknownHandler(handler));
        }
        let Some(&index) = self.rule_index.get(rule) else {
            return Err(LoadError::UnknownRule(RuleName::new(rule)));
        };
        let table = &mut self.rules[index];
        if table.bindings.contains_key(ty) {
            return Err(LoadError::DuplicateBinding {
                rule: table.name.clone(),
                ty: TypeName::new(ty),
            });
        }
        table.bindings.insert(TypeName::new(ty), handler);
        Ok(())
    }

    pub fn build(self) -> Registry {
        tracing::debug!(
            handlers = self.handlers.len(),
            rules = self.rules.len(),
            "registry built"
        );
        Registry {
            handlers: self.handlers,
            accessors: self.accessors,
            rules: self.rules,
            rule_index: self.rule_index,
        }
    }
}

/// Frozen registry. `Send + Sync`; concurrent [`apply`](Registry::apply)
/// calls need no locking.
pub struct Registry {
    handlers: Vec<Box<dyn MaskHandler>>,
    accessors: FxHashMap<String, HandlerId>,
    rules: Vec<RuleTable>,
    rule_index: FxHashMap<RuleName, usize>,
}

impl Registry {
    /// Build a live registry straight from artifacts, with interpreted
    /// handlers.
    ///
    /// Runs the initializer's insertion statements once, in order.
    pub fn load(artifacts: &Artifacts) -> Result<Registry, LoadError> {
        let mut builder = RegistryBuilder::new();
        let mut ids = Vec::with_capacity(artifacts.handlers.len());
        for handler in &artifacts.handlers {
            ids.push(builder.handler(handler.accessor.clone(), interpret(&handler.kind))?);
        }
        for entry in &artifacts.dispatch {
            builder.rule(entry.rule.clone(), entry.fallback)?;
        }
        for insertion in artifacts.initializer.statements() {
            let Some(&id) = ids.get(insertion.handler.index()) else {
                return Err(LoadError::UnknownHandler(insertion.handler));
            };
            builder.insert(insertion.rule.as_str(), insertion.ty.as_str(), id)?;
        }
        Ok(builder.build())
    }

    /// Mask `value` under `rule`.
    pub fn apply(&self, rule: &str, value: Value) -> Result<Value, DispatchError> {
        let Some(&index) = self.rule_index.get(rule) else {
            return Err(DispatchError::UnknownRule(rule.to_owned()));
        };
        Dispatch {
            registry: self,
            rule: index,
        }
        .apply(value)
    }

    /// Handler by accessor name.
    pub fn handler(&self, accessor: &str) -> Option<&dyn MaskHandler> {
        let id = self.accessors.get(accessor)?;
        self.handlers.get(id.index()).map(|handler| &**handler)
    }

    /// Whether `ty` has a binding under `rule`.
    pub fn contains(&self, rule: &str, ty: &str) -> bool {
        self.rule_index
            .get(rule)
            .is_some_and(|&index| self.rules[index].bindings.contains_key(ty))
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleName> {
        self.rules.iter().map(|table| &table.name)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

/// Dispatch bound to one rule of a registry.
///
/// Handlers receive this to route nested values under the same rule.
#[derive(Copy, Clone)]
pub struct Dispatch<'r> {
    registry: &'r Registry,
    rule: usize,
}

impl Dispatch<'_> {
    /// Route `value` to the handler bound to its exact type.
    ///
    /// `null` passes through without lookup. On a miss the rule's fallback
    /// applies; without one the miss is an error.
    pub fn apply(&self, value: Value) -> Result<Value, DispatchError> {
        if value.is_null() {
            return Ok(value);
        }
        let table = self.table();
        if let Some(id) = table.bindings.get(value.type_name()) {
            return self.registry.handlers[id.index()].mask(value, self);
        }
        tracing::trace!(
            rule = %table.name,
            ty = value.type_name(),
            fallback = ?table.fallback,
            "dispatch miss"
        );
        match table.fallback {
            Some(Fallback::Passthrough) => Ok(value),
            Some(Fallback::Nullify) => Ok(Value::Null),
            None => Err(DispatchError::Unresolved {
                rule: table.name.clone(),
                ty: TypeName::new(value.type_name()),
            }),
        }
    }

    fn table(&self) -> &RuleTable {
        &self.registry.rules[self.rule]
    }
}
