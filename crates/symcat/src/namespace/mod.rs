//! The reflective model catalogs are extracted from.
//!
//! A [`Namespace`] exposes name→object bindings. Objects are functions,
//! classes, nested namespaces, or plain values. Namespaces are built
//! explicitly, either through [`ModuleBuilder`] (optionally with the
//! [`Class`]/[`Invocable`] traits on Rust types) or from a descriptor file
//! (see [`crate::descriptor`]).

mod class;
mod function;
mod module;
mod signature;
mod value;

pub use class::{
    Class, ClassId, ClassInfo, ClassRef, DEFAULT_INVOCATION_MEMBER, Invocable, Member, class_ref,
};
pub use function::{FunctionInfo, FunctionRef};
pub use module::{Module, ModuleBuilder};
pub use signature::{Param, RECEIVER, Signature};
pub use value::{OpaqueObject, RuntimeValue};

use crate::CatalogError;

/// An object bound to a name in a namespace.
#[derive(Debug, Clone)]
pub enum Binding {
    Function(FunctionRef),
    Class(ClassRef),
    /// A nested namespace, by qualified name.
    Namespace(String),
    Value(RuntimeValue),
}

impl Binding {
    pub fn kind(&self) -> &'static str {
        match self {
            Binding::Function(_) => "function",
            Binding::Class(_) => "class",
            Binding::Namespace(_) => "namespace",
            Binding::Value(_) => "value",
        }
    }
}

/// A runtime-inspectable collection of named bindings.
///
/// Implementations must be free of side effects and must not recurse into
/// nested namespaces.
pub trait Namespace: Send + Sync {
    /// Qualified name (e.g., "keras.initializers").
    fn name(&self) -> &str;

    /// Version of the library the namespace belongs to, if known.
    fn version(&self) -> Option<&str> {
        None
    }

    /// Every binding visible on the namespace, in a stable order.
    fn bindings(&self) -> Result<Vec<(String, Binding)>, CatalogError>;
}
