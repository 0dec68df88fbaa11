//! Schema extraction from reflective namespaces.
//!
//! A [`Namespace`] exposes named bindings (functions, classes, nested
//! namespaces, plain values). [`Extractor`] turns one into a catalog of
//! [`FunctionRecord`]s or [`ClassRecord`]s: parameters with defaults,
//! docstrings, base classes, abstractness, call inputs and aliases.
//!
//! ```
//! use symcat::Extractor;
//! use symcat::namespace::{FunctionInfo, Module, Signature};
//!
//! let module = Module::builder("keras.activations")
//!     .function(FunctionInfo::new(
//!         "elu",
//!         "keras.activations",
//!         Signature::new().param("x").param_default("alpha", 1.0),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let records = Extractor::default().extract_functions(&module).unwrap();
//! assert_eq!(records[0].name, "elu");
//! assert_eq!(records[0].arguments.len(), 2);
//! ```

pub mod alias;
pub mod category;
pub mod class;
pub mod descriptor;
mod error;
pub mod extract;
pub mod namespace;
pub mod registry;
pub mod rules;
pub mod scan;
pub mod signature;

pub use alias::{AliasPatch, apply_patches};
pub use category::{Catalog, Category, Strategy};
pub use class::ClassOptions;
pub use descriptor::{NamespaceDescriptor, load_module};
pub use error::{CatalogError, DescriptorError};
pub use extract::Extractor;
pub use namespace::{Binding, Module, Namespace};
pub use registry::{categories, category, category_names, register_category, require_category};
pub use rules::{ExtractRules, RulesConfig};
pub use scan::{ScanEntry, Scanned, SkipReason, scan};
pub use symcat_core::{ClassRecord, FunctionRecord, ParamDefault, Parameter, SymbolRecord};
