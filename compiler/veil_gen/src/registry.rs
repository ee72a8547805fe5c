//! Registry assembler.
//!
//! Single-writer accumulator threaded through the generation pipeline. It
//! owns every handler created during a run, the per-rule handler sets, and
//! the type→handler bindings. Each accepted binding becomes an insertion
//! statement in the chained initializer, so initialization order is exactly
//! binding order.

use heck::{ToSnakeCase, ToUpperCamelCase};
use rustc_hash::{FxHashMap, FxHashSet};

use veil_ir::{
    Category, Config, Handler, HandlerId, HandlerKind, Initializer, Insertion, Rule, RuleName,
    RuleRegistry, TypeName,
};

use crate::chunk::ChainedInitializer;

/// Outcome of a bind request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    /// New entry recorded and an insertion statement submitted.
    Inserted,
    /// The type was already bound for this rule; the earlier entry stays.
    Skipped { existing: HandlerId },
}

/// Finished registry parts.
pub struct AssembledRegistry {
    pub handlers: Vec<Handler>,
    pub rules: Vec<RuleRegistry>,
    pub initializer: Initializer<Insertion>,
}

pub struct RegistryAssembler {
    handlers: Vec<Handler>,
    /// Shared handlers, one per (rule, category).
    shared: FxHashMap<(RuleName, Category), HandlerId>,
    /// Custom handlers, one per (rule, type).
    custom: FxHashMap<(RuleName, TypeName), HandlerId>,
    /// Handler type names and accessors in use, for collision-free naming.
    names: FxHashSet<String>,
    accessors: FxHashSet<String>,
    rules: Vec<RuleRegistry>,
    rule_index: FxHashMap<RuleName, usize>,
    bound: FxHashMap<RuleName, FxHashMap<TypeName, HandlerId>>,
    initializer: ChainedInitializer<Insertion>,
}

impl RegistryAssembler {
    pub fn new(config: &Config) -> Self {
        Self {
            handlers: Vec::new(),
            shared: FxHashMap::default(),
            custom: FxHashMap::default(),
            names: FxHashSet::default(),
            accessors: FxHashSet::default(),
            rules: Vec::with_capacity(config.rules().len()),
            rule_index: FxHashMap::default(),
            bound: FxHashMap::default(),
            initializer: ChainedInitializer::new(
                config.procedure_prefix(),
                config.max_statements(),
            ),
        }
    }

    /// Start the per-rule registry. Idempotent.
    pub fn open_rule(&mut self, rule: &Rule) {
        if self.rule_index.contains_key(&rule.name) {
            return;
        }
        self.rule_index.insert(rule.name.clone(), self.rules.len());
        self.rules.push(RuleRegistry {
            rule: rule.name.clone(),
            policy: rule.policy.clone(),
            handlers: Vec::new(),
        });
        self.bound.entry(rule.name.clone()).or_default();
    }

    /// The shared handler for `(rule, category)`, if already generated.
    pub fn shared_handler(&self, rule: &RuleName, category: Category) -> Option<HandlerId> {
        self.shared.get(&(rule.clone(), category)).copied()
    }

    /// The custom handler for `(rule, ty)`, if already generated.
    pub fn custom_handler(&self, rule: &RuleName, ty: &TypeName) -> Option<HandlerId> {
        self.custom.get(&(rule.clone(), ty.clone())).copied()
    }

    /// Record a newly generated handler under `rule`.
    ///
    /// The handler is named `<Rule><stem>Handler`. A numeric suffix keeps
    /// both the name and its snake_case accessor unique, since distinct rule
    /// names such as `a_b` and `ab` can collapse to the same accessor.
    pub fn register(&mut self, rule: &RuleName, stem: &str, kind: HandlerKind) -> HandlerId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "handler counts are bounded by rules x types, never exceed u32"
        )]
        let id = HandlerId::new(self.handlers.len() as u32);
        let (name, accessor) = self.unique_name(&format!(
            "{}{}Handler",
            rule.as_str().to_upper_camel_case(),
            stem.to_upper_camel_case()
        ));

        match &kind {
            HandlerKind::Builtin(category) => {
                self.shared.insert((rule.clone(), *category), id);
            }
            HandlerKind::Custom(plan) => {
                self.custom.insert((rule.clone(), plan.ty.clone()), id);
            }
        }
        if let Some(&index) = self.rule_index.get(rule) {
            self.rules[index].handlers.push(id);
        }

        tracing::debug!(%rule, handler = %name, category = %kind.category(), "registered handler");
        self.handlers.push(Handler {
            id,
            rule: rule.clone(),
            name,
            accessor,
            kind,
        });
        id
    }

    /// Whether `ty` already has a handler under `rule`.
    pub fn is_bound(&self, rule: &RuleName, ty: &TypeName) -> bool {
        self.bound
            .get(rule)
            .is_some_and(|types| types.contains_key(ty))
    }

    /// Bind `ty` to `handler` under `rule`.
    ///
    /// The first binding for a type wins. Built-ins are bound before
    /// discovered types, so they take precedence on conflict.
    pub fn bind(&mut self, rule: &RuleName, ty: &TypeName, handler: HandlerId) -> Binding {
        let types = self.bound.entry(rule.clone()).or_default();
        if let Some(&existing) = types.get(ty) {
            tracing::debug!(%rule, %ty, ?existing, "type already bound, skipping");
            return Binding::Skipped { existing };
        }
        types.insert(ty.clone(), handler);
        self.initializer.push(Insertion {
            rule: rule.clone(),
            ty: ty.clone(),
            handler,
        });
        Binding::Inserted
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn binding_count(&self) -> usize {
        self.initializer.len()
    }

    pub fn finish(self) -> AssembledRegistry {
        AssembledRegistry {
            handlers: self.handlers,
            rules: self.rules,
            initializer: self.initializer.build(),
        }
    }

    fn unique_name(&mut self, base: &str) -> (String, String) {
        let mut candidate = base.to_owned();
        let mut n = 2;
        loop {
            let accessor = candidate.to_snake_case();
            if !self.names.contains(&candidate) && !self.accessors.contains(&accessor) {
                self.names.insert(candidate.clone());
                self.accessors.insert(accessor.clone());
                return (candidate, accessor);
            }
            candidate = format!("{base}{n}");
            n += 1;
        }
    }
}
