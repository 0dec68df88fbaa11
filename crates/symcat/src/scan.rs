//! Namespace scanning: enumerate bindings and classify them.

use serde::Serialize;

use crate::namespace::{Binding, ClassRef, FunctionRef, Namespace};
use crate::{CatalogError, ExtractRules};

/// Why a binding takes no part in extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    /// A designated serialization/lookup helper.
    Helper,
    /// A nested namespace.
    Namespace,
    /// A plain value.
    Value,
}

/// A classified binding.
#[derive(Debug, Clone)]
pub enum Scanned {
    Function { name: String, function: FunctionRef },
    Class { name: String, class: ClassRef },
    Ignored { name: String, kind: &'static str, reason: SkipReason },
}

impl Scanned {
    pub fn name(&self) -> &str {
        match self {
            Scanned::Function { name, .. }
            | Scanned::Class { name, .. }
            | Scanned::Ignored { name, .. } => name,
        }
    }
}

/// Enumerate and classify every binding of `namespace`, in the order the
/// namespace reports them.
pub fn scan(namespace: &dyn Namespace, rules: &ExtractRules) -> Result<Vec<Scanned>, CatalogError> {
    let bindings = namespace.bindings()?;
    let mut scanned = Vec::with_capacity(bindings.len());

    for (name, binding) in bindings {
        let kind = binding.kind();
        let entry = if rules.is_helper(&name) {
            Scanned::Ignored {
                name,
                kind,
                reason: SkipReason::Helper,
            }
        } else {
            match binding {
                Binding::Function(function) => Scanned::Function { name, function },
                Binding::Class(class) => Scanned::Class { name, class },
                Binding::Namespace(_) => Scanned::Ignored {
                    name,
                    kind,
                    reason: SkipReason::Namespace,
                },
                Binding::Value(_) => Scanned::Ignored {
                    name,
                    kind,
                    reason: SkipReason::Value,
                },
            }
        };

        if let Scanned::Ignored { name, reason, .. } = &entry {
            tracing::debug!(namespace = namespace.name(), binding = %name, ?reason, "skipping binding");
        }
        scanned.push(entry);
    }

    Ok(scanned)
}

/// One row of a scan report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl From<&Scanned> for ScanEntry {
    fn from(scanned: &Scanned) -> Self {
        match scanned {
            Scanned::Function { name, .. } => ScanEntry {
                name: name.clone(),
                kind: "function",
                skipped: None,
            },
            Scanned::Class { name, .. } => ScanEntry {
                name: name.clone(),
                kind: "class",
                skipped: None,
            },
            Scanned::Ignored { name, kind, reason } => ScanEntry {
                name: name.clone(),
                kind: *kind,
                skipped: Some(*reason),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::{ClassInfo, FunctionInfo, Module, Signature};

    #[test]
    fn helpers_are_ignored_regardless_of_type() {
        let get_class = ClassInfo::new("get", "m").into_ref();
        let module = Module::builder("m")
            .function(FunctionInfo::new("serialize", "m", Signature::new()))
            .class("get", get_class)
            .function(FunctionInfo::new("relu", "m", Signature::new()))
            .build()
            .unwrap();

        let scanned = scan(&module, &ExtractRules::default()).unwrap();
        let entries: Vec<ScanEntry> = scanned.iter().map(ScanEntry::from).collect();
        assert_eq!(
            entries,
            vec![
                ScanEntry {
                    name: "get".into(),
                    kind: "class",
                    skipped: Some(SkipReason::Helper)
                },
                ScanEntry {
                    name: "relu".into(),
                    kind: "function",
                    skipped: None
                },
                ScanEntry {
                    name: "serialize".into(),
                    kind: "function",
                    skipped: Some(SkipReason::Helper)
                },
            ]
        );
    }

    #[test]
    fn nested_namespaces_and_values_are_ignored() {
        let module = Module::builder("keras")
            .submodule("backend")
            .value("__version__", "2.4.0")
            .build()
            .unwrap();

        let scanned = scan(&module, &ExtractRules::default()).unwrap();
        assert!(scanned.iter().all(|s| matches!(s, Scanned::Ignored { .. })));
        assert_eq!(scanned[0].name(), "__version__");
    }
}
