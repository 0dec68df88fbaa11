//! Namespace descriptors: a namespace's reflective state written down as a
//! JSON or YAML document, for runtimes that cannot be reflected in-process.
//!
//! ```json
//! {
//!   "name": "keras.regularizers",
//!   "version": "2.4.0",
//!   "classes": [
//!     { "name": "Regularizer", "methods": [{ "name": "__call__", "params": [{ "name": "self" }, { "name": "x" }] }] },
//!     { "name": "L1L2", "bases": ["Regularizer"],
//!       "init": [{ "name": "l1", "default": 0.0 }, { "name": "l2", "default": 0.0 }],
//!       "exports": ["L1L2", "l1_l2_reg"] }
//!   ],
//!   "functions": [{ "name": "l1_l2", "params": [{ "name": "l1", "default": 0.01 }] }],
//!   "submodules": ["backend"]
//! }
//! ```
//!
//! A `null` default is the none literal; `{"$object": "DType", "repr": "..."}`
//! is an opaque runtime object. Bases that are not declared in the document
//! become empty external classes.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::DescriptorError;
use crate::namespace::{
    Binding, ClassInfo, ClassRef, FunctionInfo, Module, Param, RuntimeValue, Signature,
};

/// Key marking an opaque object inside a default value.
pub const OBJECT_KEY: &str = "$object";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceDescriptor {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassDescriptor>,
    #[serde(default)]
    pub functions: Vec<FunctionDescriptor>,
    #[serde(default)]
    pub submodules: Vec<String>,
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDescriptor {
    pub name: String,
    /// Declaring module; defaults to the namespace name.
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub bases: Vec<String>,
    /// Constructor parameters, without the receiver.
    #[serde(default)]
    pub init: Vec<ParamDescriptor>,
    /// The constructor signature cannot be introspected.
    #[serde(default)]
    pub opaque_init: bool,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    /// Binding names; defaults to `[name]`. An empty list declares the
    /// class without binding it (a base used only for inheritance).
    #[serde(default)]
    pub exports: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDescriptor {
    pub name: String,
    /// Parameters including the receiver.
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
    #[serde(default)]
    pub returns: Vec<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub opaque: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionDescriptor {
    pub name: String,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
    #[serde(default)]
    pub returns: Vec<String>,
    #[serde(default)]
    pub opaque: bool,
    #[serde(default)]
    pub exports: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDescriptor {
    pub name: String,
    /// Missing key: no default. `null`: the none literal.
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,
}

/// Distinguish an explicit `null` from a missing key.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Convert a descriptor value into a runtime value.
pub fn runtime_value(value: &Value) -> RuntimeValue {
    match value {
        Value::Null => RuntimeValue::None,
        Value::Bool(b) => RuntimeValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => RuntimeValue::Int(i),
            None => RuntimeValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => RuntimeValue::Str(s.clone()),
        Value::Array(items) => RuntimeValue::List(items.iter().map(runtime_value).collect()),
        Value::Object(map) => match map.get(OBJECT_KEY).and_then(Value::as_str) {
            Some(type_name) => {
                let repr = map
                    .get("repr")
                    .and_then(Value::as_str)
                    .unwrap_or(type_name);
                RuntimeValue::object(type_name, repr)
            }
            None => RuntimeValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), runtime_value(v)))
                    .collect(),
            ),
        },
    }
}

fn signature(params: &[ParamDescriptor], returns: &[String], opaque: bool) -> Signature {
    if opaque {
        return Signature::opaque();
    }
    let mut sig = Signature::new();
    for param in params {
        sig.push(Param {
            name: param.name.clone(),
            default: param.default.as_ref().map(runtime_value),
        });
    }
    returns.iter().fold(sig, |sig, r| sig.returns(r.clone()))
}

impl NamespaceDescriptor {
    /// Load a descriptor, picking the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, DescriptorError> {
        let content = std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Self::from_json(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            other => Err(DescriptorError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, DescriptorError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Build the namespace the descriptor describes.
    pub fn into_module(self) -> Result<Module, DescriptorError> {
        let mut builder = ClassGraph::new(&self.name, &self.classes)?;
        for class in &self.classes {
            builder.build(&class.name)?;
        }

        let mut module = Module::builder(&self.name);
        if let Some(version) = &self.version {
            module = module.version(version);
        }

        for class in &self.classes {
            let class_ref = builder.build(&class.name)?;
            let exports = class
                .exports
                .clone()
                .unwrap_or_else(|| vec![class.name.clone()]);
            for export in exports {
                module = module.bind(export, Binding::Class(class_ref.clone()));
            }
        }

        for function in &self.functions {
            let module_name = function.module.clone().unwrap_or_else(|| self.name.clone());
            let mut info = FunctionInfo::new(
                &function.name,
                module_name,
                signature(&function.params, &function.returns, function.opaque),
            );
            if let Some(doc) = &function.doc {
                info = info.doc(doc);
            }
            let info = info.into_ref();
            let exports = function
                .exports
                .clone()
                .unwrap_or_else(|| vec![function.name.clone()]);
            for export in exports {
                module = module.function_as(export, info.clone());
            }
        }

        for submodule in &self.submodules {
            module = module.submodule(submodule);
        }
        for (name, value) in &self.values {
            module = module.value(name, runtime_value(value));
        }

        Ok(module.build()?)
    }
}

/// Load and build a namespace from a descriptor file.
pub fn load_module(path: &Path) -> Result<Module, DescriptorError> {
    NamespaceDescriptor::from_path(path)?.into_module()
}

/// Builds class objects in dependency order, once each.
struct ClassGraph<'a> {
    namespace: &'a str,
    declared: HashMap<&'a str, &'a ClassDescriptor>,
    built: HashMap<String, ClassRef>,
    in_progress: Vec<String>,
}

impl<'a> ClassGraph<'a> {
    fn new(namespace: &'a str, classes: &'a [ClassDescriptor]) -> Result<Self, DescriptorError> {
        let mut declared = HashMap::new();
        for class in classes {
            if declared.insert(class.name.as_str(), class).is_some() {
                return Err(DescriptorError::DuplicateClass(class.name.clone()));
            }
        }
        Ok(Self {
            namespace,
            declared,
            built: HashMap::new(),
            in_progress: Vec::new(),
        })
    }

    fn build(&mut self, name: &str) -> Result<ClassRef, DescriptorError> {
        if let Some(class) = self.built.get(name) {
            return Ok(class.clone());
        }

        let Some(desc) = self.declared.get(name).copied() else {
            // Undeclared base: an external class we know nothing about
            let external = ClassInfo::new(name, "").into_ref();
            self.built.insert(name.to_string(), external.clone());
            return Ok(external);
        };

        if self.in_progress.iter().any(|n| n == name) {
            return Err(DescriptorError::CyclicBases(name.to_string()));
        }
        self.in_progress.push(name.to_string());

        let module = desc
            .module
            .clone()
            .unwrap_or_else(|| self.namespace.to_string());
        let mut info = ClassInfo::new(&desc.name, module).init(signature(
            &desc.init,
            &[],
            desc.opaque_init,
        ));
        if let Some(doc) = &desc.doc {
            info = info.doc(doc);
        }
        for base in &desc.bases {
            info = info.base(self.build(base)?);
        }
        for method in &desc.methods {
            let sig = signature(&method.params, &method.returns, method.opaque);
            info = if method.is_abstract {
                info.abstract_method(&method.name, sig)
            } else {
                info.method(&method.name, sig)
            };
        }

        self.in_progress.pop();
        let class = info.into_ref();
        self.built.insert(name.to_string(), class.clone());
        Ok(class)
    }
}
