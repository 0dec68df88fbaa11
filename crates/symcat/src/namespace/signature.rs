//! Declared call signatures.

use super::RuntimeValue;

/// Name of the implicit receiver parameter.
pub const RECEIVER: &str = "self";

/// A declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    /// `None` when the parameter has no default at all.
    pub default: Option<RuntimeValue>,
}

/// The call signature of a function, constructor, or method.
///
/// Constructor signatures exclude the receiver; method signatures built with
/// [`Signature::method`] start with it, as a method declaration does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<Param>,
    returns: Vec<String>,
    opaque: bool,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// A method signature, starting with the receiver.
    pub fn method() -> Self {
        Self::new().param(RECEIVER)
    }

    /// A signature the runtime cannot introspect (native callables).
    pub fn opaque() -> Self {
        Self {
            opaque: true,
            ..Self::default()
        }
    }

    /// Append a parameter without a default.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Append a parameter with a default value.
    pub fn param_default(mut self, name: impl Into<String>, value: impl Into<RuntimeValue>) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: Some(value.into()),
        });
        self
    }

    /// Append a declared return annotation.
    pub fn returns(mut self, annotation: impl Into<String>) -> Self {
        self.returns.push(annotation.into());
        self
    }

    pub fn push(&mut self, param: Param) {
        self.params.push(param);
    }

    /// Declared parameters, or `None` if the signature is opaque.
    pub fn params(&self) -> Option<&[Param]> {
        if self.opaque {
            None
        } else {
            Some(&self.params)
        }
    }

    pub fn return_annotations(&self) -> &[String] {
        &self.returns
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque
    }
}
