//! Catalog assembly: one extraction strategy per namespace category.

use symcat_core::{ClassRecord, FunctionRecord};

use crate::alias::{AliasTable, canonical_bindings};
use crate::class::{ClassOptions, class_record};
use crate::namespace::{ClassId, Namespace};
use crate::scan::{Scanned, scan};
use crate::signature::callable_arguments;
use crate::{CatalogError, ExtractRules};

/// Runs extraction passes over namespaces.
///
/// Every call reads the namespace afresh; the extractor holds no state
/// besides its rules, so repeated calls on an unchanged namespace return
/// equal catalogs.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    rules: ExtractRules,
}

impl Extractor {
    pub fn new(rules: ExtractRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ExtractRules {
        &self.rules
    }

    /// Catalog of the functions a namespace exports. Classes are skipped.
    pub fn extract_functions(
        &self,
        namespace: &dyn Namespace,
    ) -> Result<Vec<FunctionRecord>, CatalogError> {
        tracing::info!(
            namespace = namespace.name(),
            version = namespace.version().unwrap_or("unknown"),
            "extracting functions"
        );

        let mut records = Vec::new();
        for entry in scan(namespace, &self.rules)? {
            let Scanned::Function { name, function } = entry else {
                continue;
            };
            let arguments = callable_arguments(&name, function.signature(), &self.rules)?;
            records.push(FunctionRecord {
                arguments,
                docstring: function.docstring().map(str::to_string),
                file: self.rules.module_file(function.module()),
                name,
            });
        }

        tracing::debug!(namespace = namespace.name(), count = records.len(), "functions extracted");
        Ok(records)
    }

    /// Catalog of the classes a namespace exports, with aliases resolved.
    pub fn extract_classes(
        &self,
        namespace: &dyn Namespace,
    ) -> Result<Vec<ClassRecord>, CatalogError> {
        self.extract_classes_with(namespace, ClassOptions::default())
    }

    pub fn extract_classes_with(
        &self,
        namespace: &dyn Namespace,
        options: ClassOptions,
    ) -> Result<Vec<ClassRecord>, CatalogError> {
        tracing::info!(
            namespace = namespace.name(),
            version = namespace.version().unwrap_or("unknown"),
            "extracting classes"
        );

        let classes: Vec<_> = scan(namespace, &self.rules)?
            .into_iter()
            .filter_map(|entry| match entry {
                Scanned::Class { name, class } => Some((name, class)),
                _ => None,
            })
            .collect();

        let canonical = canonical_bindings(
            classes.iter().map(|(name, class)| (name.as_str(), class)),
            &self.rules,
        );

        let mut records: Vec<(ClassId, ClassRecord)> = Vec::new();
        let mut aliases = AliasTable::new();
        for (name, class) in &classes {
            if canonical.get(&class.id()) == Some(&name.as_str()) {
                let record = class_record(name, class, &self.rules, options)?;
                records.push((class.id(), record));
            } else {
                aliases.record(class.id(), name.clone());
            }
        }

        let orphaned = aliases.attach(&mut records);
        if !orphaned.is_empty() {
            tracing::warn!(
                namespace = namespace.name(),
                aliases = ?orphaned,
                "dropping aliases of classes with no canonically named binding"
            );
        }

        tracing::debug!(namespace = namespace.name(), count = records.len(), "classes extracted");
        Ok(records.into_iter().map(|(_, record)| record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::{ClassInfo, FunctionInfo, Module, Signature};
    use symcat_core::{ParamDefault, Parameter};

    fn widgets() -> Module {
        let base = ClassInfo::new("Base", "ui.base").into_ref();
        let widget = ClassInfo::new("Widget", "ui.widgets")
            .base(base.clone())
            .init(Signature::new().param("parent"))
            .into_ref();
        let hidden = ClassInfo::new("_Hidden", "ui.widgets").into_ref();

        Module::builder("ui.widgets")
            .class("Base", base)
            .class("Widget", widget)
            .alias("widget_legacy", "Widget")
            .class("hidden_widget", hidden)
            .function(FunctionInfo::new(
                "foo",
                "ui.widgets",
                Signature::new().param("a").param_default("b", 5),
            ))
            .function(FunctionInfo::new("get", "ui.widgets", Signature::new().param("id")))
            .build()
            .unwrap()
    }

    #[test]
    fn functions_only() {
        let records = Extractor::default().extract_functions(&widgets()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "foo");
        assert_eq!(
            records[0].arguments,
            vec![
                Parameter::required("a"),
                Parameter::new("b", ParamDefault::Literal(serde_json::json!(5))),
            ]
        );
        assert_eq!(records[0].file, "ui/widgets.py");
    }

    #[test]
    fn classes_only_with_aliases() {
        let records = Extractor::default().extract_classes(&widgets()).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Base", "Widget"]);

        let widget = &records[1];
        assert_eq!(widget.base, "Base");
        assert_eq!(widget.aliases, Some(vec!["widget_legacy".to_string()]));
        assert_eq!(records[0].aliases, None);
    }

    #[test]
    fn extraction_is_idempotent() {
        let module = widgets();
        let extractor = Extractor::default();
        assert_eq!(
            extractor.extract_classes(&module).unwrap(),
            extractor.extract_classes(&module).unwrap()
        );
        assert_eq!(
            extractor.extract_functions(&module).unwrap(),
            extractor.extract_functions(&module).unwrap()
        );
    }

    #[test]
    fn reflection_failure_aborts_the_pass() {
        let module = Module::builder("native")
            .function(FunctionInfo::new("ok", "native", Signature::new()))
            .function(FunctionInfo::new("builtin", "native", Signature::opaque()))
            .build()
            .unwrap();

        let err = Extractor::default().extract_functions(&module).unwrap_err();
        assert!(matches!(err, CatalogError::Reflection { symbol, .. } if symbol == "builtin"));
    }
}
