//! Registry-built namespaces.

use std::collections::BTreeMap;

use super::{
    Binding, Class, ClassRef, FunctionInfo, FunctionRef, Namespace, RuntimeValue, class_ref,
};
use crate::CatalogError;

/// A namespace whose bindings were registered explicitly.
///
/// Bindings are kept sorted by name, which is the order
/// [`Namespace::bindings`] reports them in.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    version: Option<String>,
    bindings: BTreeMap<String, Binding>,
}

impl Module {
    pub fn builder(name: impl Into<String>) -> ModuleBuilder {
        ModuleBuilder::new(name)
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Namespace for Module {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn bindings(&self) -> Result<Vec<(String, Binding)>, CatalogError> {
        Ok(self
            .bindings
            .iter()
            .map(|(name, binding)| (name.clone(), binding.clone()))
            .collect())
    }
}

/// Builder for [`Module`].
///
/// ```
/// use symcat::namespace::{ClassInfo, FunctionInfo, Module, Namespace, Signature};
///
/// let widget = ClassInfo::new("Widget", "ui.widgets").into_ref();
/// let module = Module::builder("ui.widgets")
///     .function(FunctionInfo::new("foo", "ui.widgets", Signature::new().param("a")))
///     .class("Widget", widget)
///     .alias("widget_legacy", "Widget")
///     .build()
///     .unwrap();
///
/// assert_eq!(module.bindings().unwrap().len(), 3);
/// ```
#[derive(Debug)]
pub struct ModuleBuilder {
    name: String,
    version: Option<String>,
    bindings: BTreeMap<String, Binding>,
    aliases: Vec<(String, String)>,
}

impl ModuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            bindings: BTreeMap::new(),
            aliases: Vec::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Bind any object under a name, replacing a previous binding.
    pub fn bind(mut self, name: impl Into<String>, binding: Binding) -> Self {
        self.bindings.insert(name.into(), binding);
        self
    }

    /// Bind a function under its own name.
    pub fn function(self, function: FunctionInfo) -> Self {
        let name = function.name().to_string();
        self.bind(name, Binding::Function(function.into_ref()))
    }

    /// Bind a function object under an arbitrary name.
    pub fn function_as(self, name: impl Into<String>, function: FunctionRef) -> Self {
        self.bind(name, Binding::Function(function))
    }

    pub fn class(self, name: impl Into<String>, class: ClassRef) -> Self {
        self.bind(name, Binding::Class(class))
    }

    /// Bind the class object of a Rust type. Binding the same type twice
    /// binds one object under two names.
    pub fn class_of<T: Class>(self, name: impl Into<String>) -> Self {
        self.class(name, class_ref::<T>())
    }

    /// Bind `alias` to whatever `target` is bound to when the module is built.
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.push((alias.into(), target.into()));
        self
    }

    /// Bind a nested namespace. Nested namespaces are never scanned.
    pub fn submodule(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let qualified = format!("{}.{}", self.name, name);
        self.bind(name, Binding::Namespace(qualified))
    }

    pub fn value(self, name: impl Into<String>, value: impl Into<RuntimeValue>) -> Self {
        self.bind(name, Binding::Value(value.into()))
    }

    pub fn build(mut self) -> Result<Module, CatalogError> {
        for (alias, target) in std::mem::take(&mut self.aliases) {
            let binding = self.bindings.get(&target).cloned().ok_or_else(|| {
                CatalogError::reflection(&alias, format!("alias target `{}` is not bound", target))
            })?;
            self.bindings.insert(alias, binding);
        }

        Ok(Module {
            name: self.name,
            version: self.version,
            bindings: self.bindings,
        })
    }
}
