//! Generation pipeline.
//!
//! ```text
//! Config + TypeDiscovery
//!        ↓
//!   classify + plan      (parallel, pure; per rule × type)
//!        ↓
//!   assemble             (sequential; rule order, then discovery order)
//!        ↓
//!   dispatch entries
//!        ↓
//!    Artifacts  →  EmissionSink
//! ```
//!
//! Only the pure phase runs in parallel. Its results are collected in input
//! order before any shared state is touched, so identical inputs always
//! produce identical artifacts.

use rayon::prelude::*;

use veil_ir::{
    Artifacts, Category, Config, CustomPlan, PrimitiveKind, Rule, TypeDescriptor, TypeName,
    STRING_TYPE,
};

use crate::classify::TypeClassifier;
use crate::discovery::TypeDiscovery;
use crate::error::GenError;
use crate::registry::RegistryAssembler;
use crate::{dispatch, handler};

/// Persists finished artifacts.
pub trait EmissionSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn emit(&mut self, artifacts: &Artifacts) -> Result<(), Self::Error>;
}

/// Failure of a full generate-and-emit run.
#[derive(Debug, thiserror::Error)]
pub enum RunError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Generate(#[from] GenError),
    #[error("emission failed: {0}")]
    Emit(#[source] E),
}

/// Classification result for one (rule, type) pair, ready for assembly.
enum Planned {
    Shared(Category),
    Custom(CustomPlan),
}

/// Run generation end to end and return the artifacts.
#[tracing::instrument(level = "info", skip_all, fields(namespace = config.namespace()))]
pub fn generate(config: &Config, discovery: &dyn TypeDiscovery) -> Result<Artifacts, GenError> {
    let types = discovery.discover(config.scan())?;
    tracing::debug!(types = types.len(), rules = config.rules().len(), "discovered types");

    let classifier = TypeClassifier::new(config);
    let planned = plan_all(config, &classifier, &types)?;

    let mut assembler = RegistryAssembler::new(config);
    for (rule, plans) in config.rules().iter().zip(planned) {
        assembler.open_rule(rule);
        register_builtins(&mut assembler, config, rule);
        fold_discovered(&mut assembler, rule, &types, plans);
    }

    let dispatch = config
        .rules()
        .iter()
        .map(|rule| dispatch::entry(config, rule))
        .collect();

    tracing::info!(
        handlers = assembler.handler_count(),
        bindings = assembler.binding_count(),
        "assembled registry"
    );
    let assembled = assembler.finish();

    Ok(Artifacts {
        namespace: config.namespace().to_owned(),
        debug: config.debug(),
        handlers: assembled.handlers,
        rules: assembled.rules,
        initializer: assembled.initializer,
        dispatch,
    })
}

/// Generate, then hand the artifacts to `sink`.
///
/// The sink is only called after generation succeeds completely.
pub fn run<S: EmissionSink>(
    config: &Config,
    discovery: &dyn TypeDiscovery,
    sink: &mut S,
) -> Result<Artifacts, RunError<S::Error>> {
    let artifacts = generate(config, discovery)?;
    sink.emit(&artifacts).map_err(RunError::Emit)?;
    Ok(artifacts)
}

/// Classify every (rule, type) pair and synthesize custom plans.
///
/// Per rule, types are processed in parallel and collected in discovery
/// order; the first error in that order is the one reported.
fn plan_all(
    config: &Config,
    classifier: &TypeClassifier<'_>,
    types: &[TypeDescriptor],
) -> Result<Vec<Vec<Planned>>, GenError> {
    config
        .rules()
        .iter()
        .map(|rule| -> Result<Vec<Planned>, GenError> {
            let results: Vec<Result<Planned, GenError>> = types
                .par_iter()
                .map(|ty| plan_one(classifier, rule, ty))
                .collect();
            results.into_iter().collect()
        })
        .collect()
}

fn plan_one(
    classifier: &TypeClassifier<'_>,
    rule: &Rule,
    ty: &TypeDescriptor,
) -> Result<Planned, GenError> {
    match classifier.classify(rule, ty) {
        Category::Custom => handler::plan_custom(rule, ty).map(Planned::Custom),
        category => Ok(Planned::Shared(category)),
    }
}

/// Built-in handlers and bindings for one rule.
///
/// Primitive arrays and numerical types are only handled with native
/// serialization. Without it the rule gets a no-op handler instead.
fn register_builtins(assembler: &mut RegistryAssembler, config: &Config, rule: &Rule) {
    handler::shared(assembler, rule, Category::Enum);

    let wrapper = handler::shared(assembler, rule, Category::PrimitiveWrapper);
    for kind in PrimitiveKind::ALL {
        assembler.bind(&rule.name, &kind.type_name(), wrapper);
    }

    let string = handler::shared(assembler, rule, Category::String);
    assembler.bind(&rule.name, &TypeName::new(STRING_TYPE), string);

    let to_string = handler::shared(assembler, rule, Category::ToStringSerializable);
    for ty in config.to_string_types() {
        assembler.bind(&rule.name, ty, to_string);
    }

    handler::shared(assembler, rule, Category::Map);
    handler::shared(assembler, rule, Category::Collection);
    handler::shared(assembler, rule, Category::ObjectArray);

    if config.native_serialization() {
        let arrays = handler::shared(assembler, rule, Category::PrimitiveArray);
        for kind in PrimitiveKind::ALL {
            assembler.bind(&rule.name, &kind.array_type_name(), arrays);
        }
        let numerical = handler::shared(assembler, rule, Category::Numerical);
        for ty in config.numerical_types() {
            assembler.bind(&rule.name, ty, numerical);
        }
    } else {
        handler::shared(assembler, rule, Category::NoOp);
    }
}

/// Fold classification results for discovered types, in discovery order.
fn fold_discovered(
    assembler: &mut RegistryAssembler,
    rule: &Rule,
    types: &[TypeDescriptor],
    plans: Vec<Planned>,
) {
    for (ty, planned) in types.iter().zip(plans) {
        if assembler.is_bound(&rule.name, &ty.name) {
            tracing::debug!(rule = %rule.name, ty = %ty.name, "built-in binding takes precedence");
            continue;
        }
        let handler = match planned {
            Planned::Shared(category) => handler::shared(assembler, rule, category),
            Planned::Custom(plan) => handler::custom(assembler, rule, plan),
        };
        assembler.bind(&rule.name, &ty.name, handler);
    }
}
