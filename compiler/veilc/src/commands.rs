//! Driver commands.
//!
//! Each command returns its report as text; `main` prints it.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use veil_gen::{TypeClassifier, TypeDiscovery};
use veil_ir::{Artifacts, Config, Handler, HandlerKind, Initializer};

use crate::{CliError, FsSink, ManifestDiscovery};

/// Options for `veil generate`.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    pub manifests: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub emit_json: bool,
}

/// Generate and write sources for `config`.
pub fn generate(config: &Config, options: &GenerateOptions) -> Result<String, CliError> {
    let discovery = ManifestDiscovery::new(options.manifests.clone());
    let mut sink = FsSink::new(&options.out_dir).with_artifacts_json(options.emit_json);
    let artifacts = veil_gen::run(config, &discovery, &mut sink)?;

    let mut report = summary(&artifacts);
    for path in sink.written() {
        let _ = writeln!(report, "wrote {}", path.display());
    }
    Ok(report)
}

/// Classify every discovered type under each rule (or only `rule`).
pub fn classify(
    config: &Config,
    manifests: &[PathBuf],
    rule: Option<&str>,
) -> Result<String, CliError> {
    let rules: Vec<_> = match rule {
        Some(name) => {
            let Some(found) = config.rules().iter().find(|r| r.name.as_str() == name) else {
                return Err(CliError::UnknownRule(name.to_owned()));
            };
            vec![found]
        }
        None => config.rules().iter().collect(),
    };

    let types = ManifestDiscovery::new(manifests.to_vec())
        .discover(config.scan())
        .map_err(veil_gen::GenError::from)?;
    let classifier = TypeClassifier::new(config);
    let width = types.iter().map(|t| t.name.as_str().len()).max().unwrap_or(0);

    let mut report = String::new();
    for rule in rules {
        let _ = writeln!(report, "rule {} ({})", rule.name, rule.policy);
        for ty in &types {
            let category = classifier.classify(rule, ty);
            let _ = writeln!(report, "  {:<width$}  {category}", ty.name.as_str());
        }
    }
    Ok(report)
}

/// Summarize a dumped artifacts file, optionally resolving one type.
pub fn inspect(path: &Path, rule: Option<&str>, ty: Option<&str>) -> Result<String, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })?;
    let artifacts: Artifacts =
        serde_json::from_str(&text).map_err(|source| CliError::ParseArtifacts {
            path: path.to_owned(),
            source,
        })?;

    let Some(rule) = rule else {
        return Ok(summary(&artifacts));
    };
    let Some(entry) = artifacts.dispatch_for(rule) else {
        return Err(CliError::UnknownRule(rule.to_owned()));
    };

    let mut report = String::new();
    if let Some(ty) = ty {
        match artifacts.resolve(rule, ty) {
            Some(handler) => {
                let _ = writeln!(report, "{ty} -> {}", describe(handler));
            }
            None => {
                let fallback = entry
                    .fallback
                    .map_or_else(|| "unresolved".to_owned(), |f| format!("{f:?}").to_lowercase());
                let _ = writeln!(report, "{ty} -> no binding ({fallback})");
            }
        }
        return Ok(report);
    }

    let _ = writeln!(report, "rule {rule} via {}", entry.function);
    for handler in artifacts.handlers_for(rule) {
        let _ = writeln!(report, "  {}", describe(handler));
    }
    for binding in artifacts.bindings_for(rule) {
        let name = artifacts
            .handler(binding.handler)
            .map_or("?", |h| h.name.as_str());
        let _ = writeln!(report, "  {} => {name}", binding.ty);
    }
    Ok(report)
}

fn describe(handler: &Handler) -> String {
    match &handler.kind {
        HandlerKind::Builtin(category) => format!("{} [{category}]", handler.name),
        HandlerKind::Custom(plan) => format!(
            "{} [CUSTOM {}, {} fields]",
            handler.name,
            plan.ty,
            plan.fields.len()
        ),
    }
}

fn summary(artifacts: &Artifacts) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "namespace {}", artifacts.namespace);
    for registry in &artifacts.rules {
        let bindings = artifacts.bindings_for(registry.rule.as_str()).count();
        let _ = writeln!(
            report,
            "rule {}: {} handlers, {bindings} bindings",
            registry.rule,
            registry.handlers.len()
        );
    }
    let layout = match &artifacts.initializer {
        Initializer::Inline(statements) => format!("inline, {} statements", statements.len()),
        Initializer::Chained { procedures, .. } => format!(
            "{} procedures, {} statements",
            procedures.len(),
            artifacts.initializer.len()
        ),
    };
    let _ = writeln!(report, "initializer: {layout}");
    report
}
