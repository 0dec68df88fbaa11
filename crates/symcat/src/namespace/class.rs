//! Reflected class objects.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use super::Signature;
use crate::CatalogError;

/// Member name of the invocation entry point, unless rules say otherwise.
pub const DEFAULT_INVOCATION_MEMBER: &str = "__call__";

static NEXT_CLASS_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a class object, assigned when its [`ClassInfo`] is created.
///
/// Every binding of the same class object carries the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    fn next() -> Self {
        ClassId(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Shared handle to a class object. Binding a `ClassRef` under several
/// names aliases one object.
pub type ClassRef = Arc<ClassInfo>;

/// A member defined directly on a class.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub signature: Signature,
    /// Declared as a required capability without an implementation.
    pub is_abstract: bool,
}

/// Reflective view of a class.
#[derive(Debug)]
pub struct ClassInfo {
    id: ClassId,
    name: String,
    module: String,
    doc: Option<String>,
    bases: Vec<ClassRef>,
    init: Signature,
    members: Vec<Member>,
    /// Linearized ancestors, computed on first use. `Err` holds the class
    /// whose hierarchy could not be linearized.
    ancestors: OnceLock<Result<Vec<ClassRef>, String>>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id: ClassId::next(),
            name: name.into(),
            module: module.into(),
            doc: None,
            bases: Vec::new(),
            init: Signature::new(),
            members: Vec::new(),
            ancestors: OnceLock::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add a direct base, in declaration order.
    pub fn base(mut self, base: ClassRef) -> Self {
        self.bases.push(base);
        self.ancestors = OnceLock::new();
        self
    }

    /// Constructor signature, without the receiver.
    pub fn init(mut self, signature: Signature) -> Self {
        self.init = signature;
        self
    }

    pub fn method(mut self, name: impl Into<String>, signature: Signature) -> Self {
        self.members.push(Member {
            name: name.into(),
            signature,
            is_abstract: false,
        });
        self
    }

    /// Declare a required member that subclasses must implement.
    pub fn abstract_method(mut self, name: impl Into<String>, signature: Signature) -> Self {
        self.members.push(Member {
            name: name.into(),
            signature,
            is_abstract: true,
        });
        self
    }

    /// Define the invocation entry point from the type's [`Invocable`] impl.
    pub fn invocable<T: Invocable>(self) -> Self {
        self.method(DEFAULT_INVOCATION_MEMBER, T::call_signature())
    }

    pub fn into_ref(self) -> ClassRef {
        Arc::new(self)
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn docstring(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn bases(&self) -> &[ClassRef] {
        &self.bases
    }

    pub fn constructor(&self) -> &Signature {
        &self.init
    }

    /// Members defined directly on this class (not inherited).
    pub fn own_members(&self) -> &[Member] {
        &self.members
    }

    /// C3 linearization of this class and its ancestors, starting with the
    /// class itself. Computed once per class object.
    pub fn mro(&self) -> Result<Vec<&ClassInfo>, CatalogError> {
        let ancestors = self
            .ancestors
            .get_or_init(|| self.linearize())
            .as_ref()
            .map_err(|class| CatalogError::InconsistentHierarchy {
                class: class.clone(),
            })?;
        Ok(std::iter::once(self)
            .chain(ancestors.iter().map(|c| c.as_ref()))
            .collect())
    }

    fn linearize(&self) -> Result<Vec<ClassRef>, String> {
        let mut sequences: Vec<Vec<ClassRef>> = Vec::with_capacity(self.bases.len() + 1);
        for base in &self.bases {
            let mut seq = vec![base.clone()];
            match base.ancestors.get_or_init(|| base.linearize()) {
                Ok(ancestors) => seq.extend(ancestors.iter().cloned()),
                Err(class) => return Err(class.clone()),
            }
            sequences.push(seq);
        }
        sequences.push(self.bases.clone());

        let mut result = Vec::new();
        loop {
            sequences.retain(|seq| !seq.is_empty());
            if sequences.is_empty() {
                return Ok(result);
            }

            // A head is valid if it appears in no sequence's tail
            let head = sequences
                .iter()
                .map(|seq| &seq[0])
                .find(|candidate| {
                    !sequences
                        .iter()
                        .any(|seq| seq[1..].iter().any(|c| c.id == candidate.id))
                })
                .cloned()
                .ok_or_else(|| self.name.clone())?;

            for seq in &mut sequences {
                if seq[0].id == head.id {
                    seq.remove(0);
                }
            }
            result.push(head);
        }
    }

    /// Find a member by name along the method resolution order.
    pub fn resolve_member(&self, name: &str) -> Result<Option<&Member>, CatalogError> {
        Ok(self
            .mro()?
            .into_iter()
            .find_map(|class| class.members.iter().find(|m| m.name == name)))
    }

    /// True if some member, resolved through the MRO, is still abstract.
    pub fn is_abstract(&self) -> Result<bool, CatalogError> {
        let mro = self.mro()?;
        let mut seen: Vec<&str> = Vec::new();
        for class in &mro {
            for member in &class.members {
                if seen.contains(&member.name.as_str()) {
                    continue;
                }
                seen.push(&member.name);
                if member.is_abstract {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// A Rust type that describes itself as a reflectable class.
///
/// ```
/// use symcat::namespace::{Class, ClassInfo, Invocable, Signature};
///
/// struct MaxNorm;
///
/// impl Class for MaxNorm {
///     fn class_info() -> ClassInfo {
///         ClassInfo::new("MaxNorm", "keras.constraints")
///             .init(Signature::new().param_default("max_value", 2).param_default("axis", 0))
///             .invocable::<Self>()
///     }
/// }
///
/// impl Invocable for MaxNorm {
///     fn call_signature() -> Signature {
///         Signature::method().param("w")
///     }
/// }
///
/// let info = symcat::namespace::class_ref::<MaxNorm>();
/// assert!(info.resolve_member("__call__").unwrap().is_some());
/// ```
pub trait Class: 'static {
    fn class_info() -> ClassInfo;
}

/// Opt-in capability: instances can be called like a function.
pub trait Invocable: Class {
    /// Signature of the entry point, including the receiver.
    fn call_signature() -> Signature;
}

/// Interned class objects for Rust types, keyed by `TypeId`.
static CLASS_OBJECTS: OnceLock<RwLock<HashMap<TypeId, ClassRef>>> = OnceLock::new();

/// Get the class object for a Rust type, creating it on first use.
///
/// Repeated calls return the same object, so a type bound under two names
/// is one class with an alias.
pub fn class_ref<T: Class>() -> ClassRef {
    let lock = CLASS_OBJECTS.get_or_init(|| RwLock::new(HashMap::new()));
    let key = TypeId::of::<T>();
    if let Some(existing) = lock.read().unwrap().get(&key) {
        return existing.clone();
    }

    // Built outside the lock: class_info() may intern its bases.
    let created = T::class_info().into_ref();
    lock.write().unwrap().entry(key).or_insert(created).clone()
}
