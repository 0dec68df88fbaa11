//! Reflected free functions.

use std::sync::Arc;

use super::Signature;

pub type FunctionRef = Arc<FunctionInfo>;

/// Reflective view of a free function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInfo {
    name: String,
    module: String,
    doc: Option<String>,
    signature: Signature,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>, module: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            doc: None,
            signature,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn into_ref(self) -> FunctionRef {
        Arc::new(self)
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

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}
