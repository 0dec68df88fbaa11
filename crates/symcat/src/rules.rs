//! Naming and classification rules for extraction.
//!
//! Example config.toml section:
//! ```toml
//! [rules]
//! helpers = ["serialize", "deserialize", "get"]
//! abstract_classes = ["Initializer", "Constraint", "Regularizer"]
//! invocation_member = "__call__"
//! text_types = ["DType"]
//! ```

use serde::{Deserialize, Serialize};

use crate::namespace::DEFAULT_INVOCATION_MEMBER;

/// Serialization helpers exported next to the symbols they handle.
pub const SERIALIZATION_HELPERS: &[&str] = &["serialize", "deserialize"];

/// Lookup helpers (`get("glorot_uniform")`).
pub const INIT_HELPERS: &[&str] = &["get"];

/// Classes treated as abstract whatever their declaration says.
pub const ABSTRACT_CLASSES: &[&str] = &["Initializer", "Constraint", "Regularizer"];

/// Scalar wrapper types whose defaults are rendered as text.
pub const TEXT_TYPES: &[&str] = &["DType"];

/// Resolved rules used by the extractors.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractRules {
    pub helpers: Vec<String>,
    pub abstract_classes: Vec<String>,
    /// Names starting with this are private and never canonical.
    pub private_prefix: String,
    pub invocation_member: String,
    /// Reported as `base` for classes without ancestors.
    pub root_type: String,
    /// Extension of synthesized `file` paths, without the dot.
    pub source_extension: String,
    pub text_types: Vec<String>,
}

impl Default for ExtractRules {
    fn default() -> Self {
        Self {
            helpers: SERIALIZATION_HELPERS
                .iter()
                .chain(INIT_HELPERS)
                .map(|s| s.to_string())
                .collect(),
            abstract_classes: ABSTRACT_CLASSES.iter().map(|s| s.to_string()).collect(),
            private_prefix: "_".to_string(),
            invocation_member: DEFAULT_INVOCATION_MEMBER.to_string(),
            root_type: "object".to_string(),
            source_extension: "py".to_string(),
            text_types: TEXT_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExtractRules {
    /// Helper bindings are excluded from every extraction.
    pub fn is_helper(&self, name: &str) -> bool {
        self.helpers.iter().any(|h| h == name)
    }

    pub fn is_known_abstract(&self, name: &str) -> bool {
        self.abstract_classes.iter().any(|c| c == name)
    }

    /// Canonical class names start uppercase and are not private.
    pub fn is_canonical_name(&self, name: &str) -> bool {
        let starts_upper = name.chars().next().is_some_and(char::is_uppercase);
        let private = !self.private_prefix.is_empty() && name.starts_with(&self.private_prefix);
        starts_upper && !private
    }

    pub fn is_text_type(&self, type_name: &str) -> bool {
        self.text_types.iter().any(|t| t == type_name)
    }

    /// Synthesize a source path from a dotted module name.
    pub fn module_file(&self, module: &str) -> String {
        let path = module.split('.').collect::<Vec<_>>().join("/");
        if self.source_extension.is_empty() {
            path
        } else {
            format!("{}.{}", path, self.source_extension)
        }
    }
}

/// The `[rules]` config section. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    pub helpers: Option<Vec<String>>,
    pub abstract_classes: Option<Vec<String>>,
    pub private_prefix: Option<String>,
    pub invocation_member: Option<String>,
    pub root_type: Option<String>,
    pub source_extension: Option<String>,
    pub text_types: Option<Vec<String>>,
}

impl RulesConfig {
    /// Fields set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            helpers: other.helpers.or(self.helpers),
            abstract_classes: other.abstract_classes.or(self.abstract_classes),
            private_prefix: other.private_prefix.or(self.private_prefix),
            invocation_member: other.invocation_member.or(self.invocation_member),
            root_type: other.root_type.or(self.root_type),
            source_extension: other.source_extension.or(self.source_extension),
            text_types: other.text_types.or(self.text_types),
        }
    }

    pub fn resolve(&self) -> ExtractRules {
        let defaults = ExtractRules::default();
        ExtractRules {
            helpers: self.helpers.clone().unwrap_or(defaults.helpers),
            abstract_classes: self
                .abstract_classes
                .clone()
                .unwrap_or(defaults.abstract_classes),
            private_prefix: self
                .private_prefix
                .clone()
                .unwrap_or(defaults.private_prefix),
            invocation_member: self
                .invocation_member
                .clone()
                .unwrap_or(defaults.invocation_member),
            root_type: self.root_type.clone().unwrap_or(defaults.root_type),
            source_extension: self
                .source_extension
                .clone()
                .unwrap_or(defaults.source_extension),
            text_types: self.text_types.clone().unwrap_or(defaults.text_types),
        }
    }
}
