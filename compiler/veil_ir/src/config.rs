//! Generation configuration.
//!
//! [`ConfigFile`] is the raw, deserializable shape where the essentials may
//! be absent. [`Config`] is the validated form every generation stage takes;
//! building one is the only place configuration errors are reported.

use rustc_hash::FxHashSet;

use crate::{Fallback, Rule, RuleName, TypeName};

/// Default bound on insertion statements per initializer procedure.
pub const DEFAULT_MAX_STATEMENTS: usize = 1000;

/// Default name prefix for chained initializer procedures.
pub const DEFAULT_PROCEDURE_PREFIX: &str = "chainedMethod";

/// Types rendered through their textual form unless configured otherwise.
pub const DEFAULT_TO_STRING_TYPES: &[&str] = &["url::Url"];

/// Arbitrary-precision numeric types unless configured otherwise.
pub const DEFAULT_NUMERICAL_TYPES: &[&str] = &["num_bigint::BigInt", "rust_decimal::Decimal"];

/// Configuration failures. All are raised before any generation work.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration does not define a rule set")]
    MissingRules,
    #[error("configuration rule set is empty")]
    EmptyRules,
    #[error("configuration does not define an output namespace")]
    MissingNamespace,
    #[error("namespace `{0}` is not a `::`-separated path of identifiers")]
    InvalidNamespace(String),
    #[error("configuration does not define any scan locations")]
    MissingScanLocations,
    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(RuleName),
    #[error("rule name `{0}` is not a valid identifier")]
    InvalidRuleName(RuleName),
    #[error("procedure prefix `{0}` is not a valid identifier")]
    InvalidProcedurePrefix(String),
}

fn default_max_statements() -> usize {
    DEFAULT_MAX_STATEMENTS
}

fn default_procedure_prefix() -> String {
    DEFAULT_PROCEDURE_PREFIX.to_owned()
}

fn default_to_string_types() -> Vec<TypeName> {
    DEFAULT_TO_STRING_TYPES.iter().copied().map(TypeName::from).collect()
}

fn default_numerical_types() -> Vec<TypeName> {
    DEFAULT_NUMERICAL_TYPES.iter().copied().map(TypeName::from).collect()
}

/// Raw configuration as read from disk.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub namespace: Option<String>,
    pub scan: Option<Vec<String>>,
    pub rules: Option<Vec<Rule>>,
    #[serde(default)]
    pub native_serialization: bool,
    #[serde(default = "default_to_string_types")]
    pub to_string_types: Vec<TypeName>,
    #[serde(default = "default_numerical_types")]
    pub numerical_types: Vec<TypeName>,
    #[serde(default = "default_max_statements")]
    pub max_statements: usize,
    #[serde(default = "default_procedure_prefix")]
    pub procedure_prefix: String,
    #[serde(default)]
    pub fallback: Option<Fallback>,
    #[serde(default)]
    pub debug: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            namespace: None,
            scan: None,
            rules: None,
            native_serialization: false,
            to_string_types: default_to_string_types(),
            numerical_types: default_numerical_types(),
            max_statements: DEFAULT_MAX_STATEMENTS,
            procedure_prefix: default_procedure_prefix(),
            fallback: None,
            debug: false,
        }
    }
}

/// Validated configuration for one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    namespace: String,
    scan: Vec<String>,
    rules: Vec<Rule>,
    native_serialization: bool,
    to_string_types: Vec<TypeName>,
    numerical_types: Vec<TypeName>,
    max_statements: usize,
    procedure_prefix: String,
    fallback: Option<Fallback>,
    debug: bool,
}

impl Config {
    /// Build a configuration with defaults for everything but the essentials.
    pub fn new(
        namespace: impl Into<String>,
        scan: Vec<String>,
        rules: Vec<Rule>,
    ) -> Result<Self, ConfigError> {
        Self::from_file(ConfigFile {
            namespace: Some(namespace.into()),
            scan: Some(scan),
            rules: Some(rules),
            ..ConfigFile::default()
        })
    }

    /// Validate a raw configuration.
    pub fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let rules = file.rules.ok_or(ConfigError::MissingRules)?;
        if rules.is_empty() {
            return Err(ConfigError::EmptyRules);
        }
        let namespace = file
            .namespace
            .filter(|ns| !ns.trim().is_empty())
            .ok_or(ConfigError::MissingNamespace)?;
        if !namespace.split("::").all(is_identifier) {
            return Err(ConfigError::InvalidNamespace(namespace));
        }
        let scan = file.scan.ok_or(ConfigError::MissingScanLocations)?;
        if scan.is_empty() {
            return Err(ConfigError::MissingScanLocations);
        }

        let mut seen = FxHashSet::default();
        for rule in &rules {
            if !is_identifier(rule.name.as_str()) {
                return Err(ConfigError::InvalidRuleName(rule.name.clone()));
            }
            if !seen.insert(&rule.name) {
                return Err(ConfigError::DuplicateRule(rule.name.clone()));
            }
        }
        if !is_identifier(&file.procedure_prefix) {
            return Err(ConfigError::InvalidProcedurePrefix(file.procedure_prefix));
        }

        Ok(Self {
            namespace,
            scan,
            rules,
            native_serialization: file.native_serialization,
            to_string_types: dedup(file.to_string_types),
            numerical_types: dedup(file.numerical_types),
            max_statements: file.max_statements,
            procedure_prefix: file.procedure_prefix,
            fallback: file.fallback,
            debug: file.debug,
        })
    }

    #[must_use]
    pub fn with_native_serialization(mut self, enabled: bool) -> Self {
        self.native_serialization = enabled;
        self
    }

    #[must_use]
    pub fn with_max_statements(mut self, max: usize) -> Self {
        self.max_statements = max;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Option<Fallback>) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn with_to_string_types(mut self, types: Vec<TypeName>) -> Self {
        self.to_string_types = dedup(types);
        self
    }

    #[must_use]
    pub fn with_numerical_types(mut self, types: Vec<TypeName>) -> Self {
        self.numerical_types = dedup(types);
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn scan(&self) -> &[String] {
        &self.scan
    }

    /// Rules in declaration order. This order drives generation.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn native_serialization(&self) -> bool {
        self.native_serialization
    }

    pub fn to_string_types(&self) -> &[TypeName] {
        &self.to_string_types
    }

    pub fn numerical_types(&self) -> &[TypeName] {
        &self.numerical_types
    }

    pub fn max_statements(&self) -> usize {
        self.max_statements
    }

    pub fn procedure_prefix(&self) -> &str {
        &self.procedure_prefix
    }

    pub fn fallback(&self) -> Option<Fallback> {
        self.fallback
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

/// Keep the first occurrence of each type, preserving order.
fn dedup(types: Vec<TypeName>) -> Vec<TypeName> {
    let mut seen = FxHashSet::default();
    types
        .into_iter()
        .filter(|ty| seen.insert(ty.clone()))
        .collect()
}

/// ASCII identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn essentials() -> ConfigFile {
        ConfigFile {
            namespace: Some("acme::masks".into()),
            scan: Some(vec!["acme".into()]),
            rules: Some(vec![Rule::new("public", "redact")]),
            ..ConfigFile::default()
        }
    }

    #[test]
    fn defaults_apply() {
        let Ok(config) = Config::from_file(essentials()) else {
            panic!("essentials should validate");
        };
        assert_eq!(config.max_statements(), 1000);
        assert_eq!(config.procedure_prefix(), "chainedMethod");
        assert!(!config.native_serialization());
        assert_eq!(config.to_string_types(), &[TypeName::new("url::Url")]);
        assert_eq!(config.numerical_types().len(), 2);
        assert_eq!(config.fallback(), None);
    }

    #[test]
    fn missing_essentials_are_rejected() {
        let mut file = essentials();
        file.rules = None;
        assert_eq!(Config::from_file(file), Err(ConfigError::MissingRules));

        let mut file = essentials();
        file.rules = Some(Vec::new());
        assert_eq!(Config::from_file(file), Err(ConfigError::EmptyRules));

        let mut file = essentials();
        file.namespace = None;
        assert_eq!(Config::from_file(file), Err(ConfigError::MissingNamespace));

        let mut file = essentials();
        file.scan = None;
        assert_eq!(Config::from_file(file), Err(ConfigError::MissingScanLocations));
    }

    #[test]
    fn namespace_must_be_a_path() {
        for bad in ["acme::", "acme masks", "acme::masks\nfn evil() {}", "::acme"] {
            let mut file = essentials();
            file.namespace = Some(bad.into());
            assert_eq!(
                Config::from_file(file),
                Err(ConfigError::InvalidNamespace(bad.into()))
            );
        }

        let mut file = essentials();
        file.namespace = Some("generated".into());
        assert!(Config::from_file(file).is_ok());
    }

    #[test]
    fn duplicate_rules_are_rejected() {
        let mut file = essentials();
        file.rules = Some(vec![Rule::new("public", "a"), Rule::new("public", "b")]);
        assert_eq!(
            Config::from_file(file),
            Err(ConfigError::DuplicateRule(RuleName::new("public")))
        );
    }

    #[test]
    fn rule_names_must_be_identifiers() {
        let mut file = essentials();
        file.rules = Some(vec![Rule::new("not-an-ident", "a")]);
        assert_eq!(
            Config::from_file(file),
            Err(ConfigError::InvalidRuleName(RuleName::new("not-an-ident")))
        );
    }

    #[test]
    fn identifier_check() {
        assert!(is_identifier("chainedMethod"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn configured_type_sets_are_deduplicated() {
        let Ok(config) = Config::from_file(essentials()) else {
            panic!("essentials should validate");
        };
        let config = config.with_to_string_types(vec!["a::B".into(), "a::C".into(), "a::B".into()]);
        assert_eq!(
            config.to_string_types(),
            &[TypeName::new("a::B"), TypeName::new("a::C")]
        );
    }
}
