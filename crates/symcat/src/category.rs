//! Categories: named extraction jobs over one namespace each.

use serde::{Deserialize, Serialize};
use symcat_core::SymbolRecord;

use crate::alias::AliasPatch;
use crate::class::ClassOptions;
use crate::extract::Extractor;
use crate::namespace::Namespace;
use crate::CatalogError;

/// Which extraction pass a category runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Functions,
    Classes,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Functions => "functions",
            Strategy::Classes => "classes",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named extraction job.
///
/// ```toml
/// [[categories]]
/// name = "layers"
/// strategy = "classes"
/// call_annotations = true
///
/// [[categories.patches]]
/// target = "Dense"
/// aliases = ["dense"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub name: String,
    pub strategy: Strategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only meaningful for class categories.
    #[serde(default)]
    pub call_annotations: bool,
    /// Applied to class records after extraction, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patches: Vec<AliasPatch>,
}

impl Category {
    pub fn new(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            strategy,
            description: None,
            call_annotations: false,
            patches: Vec::new(),
        }
    }

    pub fn functions(name: impl Into<String>) -> Self {
        Self::new(name, Strategy::Functions)
    }

    pub fn classes(name: impl Into<String>) -> Self {
        Self::new(name, Strategy::Classes)
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_call_annotations(mut self) -> Self {
        self.call_annotations = true;
        self
    }

    pub fn patch(mut self, patch: AliasPatch) -> Self {
        self.patches.push(patch);
        self
    }

    /// Run the category's pass over a namespace.
    pub fn extract(
        &self,
        extractor: &Extractor,
        namespace: &dyn Namespace,
    ) -> Result<Catalog, CatalogError> {
        let records: Vec<SymbolRecord> = match self.strategy {
            Strategy::Functions => extractor
                .extract_functions(namespace)?
                .into_iter()
                .map(SymbolRecord::from)
                .collect(),
            Strategy::Classes => {
                let options = ClassOptions {
                    call_annotations: self.call_annotations,
                };
                extractor
                    .extract_classes_with(namespace, options)?
                    .into_iter()
                    .map(SymbolRecord::from)
                    .collect()
            }
        };

        let mut catalog = Catalog {
            namespace: namespace.name().to_string(),
            version: namespace.version().map(str::to_string),
            category: self.name.clone(),
            records,
        };
        catalog.patch(&self.patches);
        Ok(catalog)
    }
}

/// Result of running a category: the records plus where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub category: String,
    pub records: Vec<SymbolRecord>,
}

impl Catalog {
    /// Apply alias patches to the class records.
    pub fn patch(&mut self, patches: &[AliasPatch]) {
        for patch in patches {
            let classes = self.records.iter_mut().filter_map(|r| match r {
                SymbolRecord::Class(class) => Some(class),
                SymbolRecord::Function(_) => None,
            });
            if patch.apply(classes) == 0 {
                tracing::debug!(
                    category = %self.category,
                    record = %patch.target,
                    "alias patch matched no record"
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
