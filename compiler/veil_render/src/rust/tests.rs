use heck::ToSnakeCase;
use pretty_assertions::assert_eq;

use veil_gen::{generate, run, StaticDiscovery};
use veil_ir::{
    Artifacts, Category, CompareOp, Config, CustomPlan, DispatchEntry, Fallback, FieldAction,
    FieldDescriptor, FieldPlan, FieldTraits, Guard, Handler, HandlerId, HandlerKind, Initializer,
    Insertion, Literal, MaskPlan, OperationFragment, Procedure, Rule, RuleName, RuleRegistry,
    TypeDescriptor, TypeFlags, TypeName,
};

use super::handlers::literal;
use super::render;
use crate::{MemorySink, RenderedUnit};

fn config() -> Config {
    let Ok(config) = Config::new(
        "acme::masks",
        vec!["acme".into()],
        vec![Rule::new("public", "redact"), Rule::new("internal", "hash")],
    ) else {
        panic!("test configuration should validate");
    };
    config
}

fn types() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::object("acme::User")
            .with_field(FieldDescriptor::new("id", "i64", FieldTraits::PRIMITIVE))
            .with_field(FieldDescriptor::new("email", "String", FieldTraits::EQUATABLE).masked("public"))
            .with_field(
                FieldDescriptor::new("age", "i32", FieldTraits::PRIMITIVE).masked_when(
                    "public",
                    CompareOp::Lt,
                    Literal::Int(18),
                ),
            ),
        TypeDescriptor::object("acme::Secret")
            .with_field(FieldDescriptor::new("token", "String", FieldTraits::EQUATABLE).masked("public")),
        TypeDescriptor::new("acme::Status", TypeFlags::ENUM | TypeFlags::PUBLIC),
        TypeDescriptor::object("acme::Point")
            .with_field(FieldDescriptor::new("x", "i32", FieldTraits::PRIMITIVE))
            .with_field(FieldDescriptor::new("y", "i32", FieldTraits::PRIMITIVE)),
    ]
}

fn artifacts(config: &Config) -> Artifacts {
    match generate(config, &StaticDiscovery::new(types())) {
        Ok(artifacts) => artifacts,
        Err(err) => panic!("generation failed: {err}"),
    }
}

fn source<'a>(units: &'a [RenderedUnit], path: &str) -> &'a str {
    match units.iter().find(|unit| unit.path == path) {
        Some(unit) => &unit.source,
        None => panic!("missing unit {path}"),
    }
}

#[test]
fn renders_four_units_with_header() {
    let units = render(&artifacts(&config()));
    let paths: Vec<_> = units.iter().map(|u| u.path.as_str()).collect();
    assert_eq!(paths, vec!["mod.rs", "handlers.rs", "registry.rs", "dispatch.rs"]);
    assert!(units.iter().all(|u| u.source.starts_with(super::HEADER)));
    assert!(source(&units, "mod.rs").contains("pub use dispatch::{apply_public, apply_internal};"));
}

#[test]
fn small_initializer_stays_inline() {
    let units = render(&artifacts(&config()));
    let registry = source(&units, "registry.rs");
    assert!(!registry.contains("chainedMethod"));
    assert!(!registry.contains("non_snake_case"));
    assert!(registry.contains(
        "builder.insert(\"public\", \"i32\", ids.public_primitive_wrapper_handler)?;"
    ));
    assert!(registry.contains("builder.rule(\"public\", None)?;"));
}

#[test]
fn large_initializer_is_chained_with_wrapper() {
    let config = config().with_max_statements(4);
    let artifacts = artifacts(&config);
    let procedures = artifacts.initializer.procedures().len();
    assert!(procedures > 1);

    let units = render(&artifacts);
    let registry = source(&units, "registry.rs");
    assert!(registry.contains("#![allow(non_snake_case)]"));
    assert_eq!(registry.matches("fn chainedMethod").count(), procedures);

    let calls: Vec<_> = registry
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("chainedMethod"))
        .collect();
    let expected: Vec<_> = (1..=procedures)
        .map(|n| format!("chainedMethod{n}(&mut builder, &ids)?;"))
        .collect();
    assert_eq!(calls, expected);
}

#[test]
fn builtin_handlers_delegate_to_runtime() {
    let units = render(&artifacts(&config()));
    let handlers = source(&units, "handlers.rs");
    assert!(handlers.contains("pub struct PublicStringHandler;"));
    assert!(handlers.contains("BuiltinHandler(Category::String).mask(value, dispatch)"));
    assert!(handlers.contains("/// Rule `internal`: NO_OP."));
}

#[test]
fn custom_handlers_render_field_actions() {
    let units = render(&artifacts(&config()));
    let handlers = source(&units, "handlers.rs");
    assert!(handlers.contains("impl MaskHandler for PublicUserHandler {"));
    assert!(handlers.contains("if let Some(slot) = object.get_mut(\"email\") {"));
    assert!(handlers.contains(
        "*slot = if !field.is_null() && ((field < Value::from(18_i64))) {"
    ));
    // Only unconditional masks: dispatch is never consulted.
    let secret = handlers
        .split("impl MaskHandler for PublicSecretHandler {")
        .nth(1)
        .and_then(|rest| rest.split("pub struct").next())
        .unwrap_or_default();
    assert!(secret.contains("_dispatch: &Dispatch<'_>"));
}

#[test]
fn all_primitive_custom_type_is_identity() {
    let units = render(&artifacts(&config()));
    let handlers = source(&units, "handlers.rs");
    let point = handlers
        .split("impl MaskHandler for PublicPointHandler {")
        .nth(1)
        .and_then(|rest| rest.split("pub struct").next())
        .unwrap_or_default();
    assert!(point.contains("_dispatch: &Dispatch<'_>"));
    assert!(point.contains("Ok(value)"));
    assert!(!point.contains("get_mut"));
}

#[test]
fn debug_mode_traces_dispatch() {
    let quiet = render(&artifacts(&config()));
    assert!(!source(&quiet, "dispatch.rs").contains("tracing::trace!"));

    let loud = render(&artifacts(&config().with_debug(true)));
    let dispatch = source(&loud, "dispatch.rs");
    assert!(dispatch.contains(
        "pub fn apply_public(registry: &Registry, value: Value) -> Result<Value, DispatchError> {"
    ));
    assert!(dispatch.contains("tracing::trace!(rule = \"public\", ty = value.type_name(), \"dispatch\");"));
    assert!(dispatch.contains("/// Mask `value` under rule `internal` (policy `hash`)."));
}

#[test]
fn literals_render_as_value_expressions() {
    assert_eq!(literal(&Literal::Int(-5)), "Value::from(-5_i64)");
    assert_eq!(literal(&Literal::Float(1.0)), "Value::from(1.0_f64)");
    assert_eq!(literal(&Literal::Float(f64::NEG_INFINITY)), "Value::from(-f64::INFINITY)");
    assert_eq!(literal(&Literal::Bool(true)), "Value::from(true)");
    assert_eq!(literal(&Literal::Str("a\"b".into())), "Value::from(\"a\\\"b\")");
}

#[test]
fn memory_sink_keeps_rendered_units() {
    let mut sink = MemorySink::new();
    let Ok(artifacts) = run(&config(), &StaticDiscovery::new(types()), &mut sink) else {
        panic!("run should succeed");
    };
    assert_eq!(sink.artifacts.as_ref(), Some(&artifacts));
    assert_eq!(sink.units, render(&artifacts));
    assert!(sink.unit("handlers.rs").is_some());
}

/// Artifacts behind the rendered sources checked in under
/// `veil_rt/tests/generated`, which that crate compiles and runs.
fn compiled_fixture() -> Artifacts {
    let handler = |id: u32, rule: &str, name: &str, kind: HandlerKind| Handler {
        id: HandlerId::new(id),
        rule: RuleName::new(rule),
        name: name.to_owned(),
        accessor: name.to_snake_case(),
        kind,
    };
    let field = |name: &str, ty: &str, action: FieldAction| FieldPlan {
        name: name.to_owned(),
        ty: TypeName::new(ty),
        action,
    };
    let guarded = |op: CompareOp, operand: Literal, fragment: OperationFragment| {
        FieldAction::Mask(MaskPlan {
            always: false,
            guards: vec![Guard {
                op,
                operand,
                fragment,
            }],
        })
    };
    let user = CustomPlan {
        ty: TypeName::new("acme::User"),
        fields: vec![
            field("id", "i64", FieldAction::Keep),
            field(
                "email",
                "String",
                FieldAction::Mask(MaskPlan {
                    always: true,
                    guards: Vec::new(),
                }),
            ),
            field(
                "age",
                "i32",
                guarded(CompareOp::Lt, Literal::Int(18), OperationFragment::Direct(CompareOp::Lt)),
            ),
            field(
                "score",
                "f64",
                guarded(
                    CompareOp::Ge,
                    Literal::Float(0.5),
                    OperationFragment::ThreeWay(CompareOp::Ge),
                ),
            ),
            field(
                "nick",
                "String",
                guarded(
                    CompareOp::Eq,
                    Literal::Str("root".into()),
                    OperationFragment::Structural { negated: false },
                ),
            ),
            field("tags", "Vec<String>", FieldAction::Descend),
        ],
    };
    let note = CustomPlan {
        ty: TypeName::new("acme::Note"),
        fields: vec![field("text", "String", FieldAction::Keep)],
    };
    let insert = |rule: &str, ty: &str, id: u32| Insertion {
        rule: RuleName::new(rule),
        ty: TypeName::new(ty),
        handler: HandlerId::new(id),
    };

    Artifacts {
        namespace: "acme::masks".into(),
        debug: false,
        handlers: vec![
            handler(0, "public", "PublicStringHandler", HandlerKind::Builtin(Category::String)),
            handler(
                1,
                "public",
                "PublicPrimitiveWrapperHandler",
                HandlerKind::Builtin(Category::PrimitiveWrapper),
            ),
            handler(
                2,
                "public",
                "PublicCollectionHandler",
                HandlerKind::Builtin(Category::Collection),
            ),
            handler(3, "public", "PublicUserHandler", HandlerKind::Custom(user)),
            handler(4, "audit", "AuditNoteHandler", HandlerKind::Custom(note)),
        ],
        rules: vec![
            RuleRegistry {
                rule: RuleName::new("public"),
                policy: "redact".into(),
                handlers: (0..4).map(HandlerId::new).collect(),
            },
            RuleRegistry {
                rule: RuleName::new("audit"),
                policy: "hash".into(),
                handlers: vec![HandlerId::new(4)],
            },
        ],
        initializer: Initializer::Chained {
            procedures: vec![
                Procedure {
                    name: "chainedMethod1".into(),
                    body: vec![
                        insert("public", "String", 0),
                        insert("public", "i32", 1),
                        insert("public", "f64", 1),
                    ],
                },
                Procedure {
                    name: "chainedMethod2".into(),
                    body: vec![
                        insert("public", "Vec<String>", 2),
                        insert("public", "acme::User", 3),
                        insert("audit", "acme::Note", 4),
                    ],
                },
            ],
            wrapper: vec!["chainedMethod1".into(), "chainedMethod2".into()],
        },
        dispatch: vec![
            DispatchEntry {
                rule: RuleName::new("public"),
                function: "apply_public".into(),
                fallback: None,
            },
            DispatchEntry {
                rule: RuleName::new("audit"),
                function: "apply_audit".into(),
                fallback: Some(Fallback::Passthrough),
            },
        ],
    }
}

#[test]
fn output_matches_compiled_fixture() {
    let units = render(&compiled_fixture());
    let expected = [
        ("mod.rs", include_str!("../../../veil_rt/tests/generated/mod.rs")),
        ("handlers.rs", include_str!("../../../veil_rt/tests/generated/handlers.rs")),
        ("registry.rs", include_str!("../../../veil_rt/tests/generated/registry.rs")),
        ("dispatch.rs", include_str!("../../../veil_rt/tests/generated/dispatch.rs")),
    ];
    for (path, text) in expected {
        assert_eq!(source(&units, path), text, "{path} drifted from the compiled fixture");
    }
}
