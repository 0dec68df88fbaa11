//! Parameter types for extracted signatures.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Marker written for a default that is the platform's none literal.
pub const NONE_MARKER: &str = "None";

/// A resolved parameter default.
///
/// `Absent` and `NoneLiteral` are distinct in memory but `NoneLiteral`
/// serializes as the string `"None"`, matching catalogs produced by the
/// reflective extractor this format originates from.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDefault {
    /// The parameter has no default.
    Absent,
    /// The default is the platform's "no value" literal.
    NoneLiteral,
    /// Textual form of a default that has no serializable representation.
    Text(String),
    /// A default representable as-is.
    Literal(Value),
}

impl ParamDefault {
    pub fn is_absent(&self) -> bool {
        matches!(self, ParamDefault::Absent)
    }

    /// The value this default serializes to.
    pub fn to_value(&self) -> Value {
        match self {
            ParamDefault::Absent => Value::Null,
            ParamDefault::NoneLiteral => Value::String(NONE_MARKER.to_string()),
            ParamDefault::Text(text) => Value::String(text.clone()),
            ParamDefault::Literal(value) => value.clone(),
        }
    }
}

impl Serialize for ParamDefault {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamDefault::Absent => serializer.serialize_none(),
            ParamDefault::NoneLiteral => serializer.serialize_str(NONE_MARKER),
            ParamDefault::Text(text) => serializer.serialize_str(text),
            ParamDefault::Literal(value) => value.serialize(serializer),
        }
    }
}

/// One entry of an ordered argument list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub default: ParamDefault,
}

impl Parameter {
    pub fn new(name: impl Into<String>, default: ParamDefault) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }

    /// A parameter without a default.
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, ParamDefault::Absent)
    }

    /// Format as `name` or `name=default` for text output.
    pub fn format_summary(&self) -> String {
        match &self.default {
            ParamDefault::Absent => self.name.clone(),
            ParamDefault::NoneLiteral => format!("{}={}", self.name, NONE_MARKER),
            ParamDefault::Text(text) => format!("{}={}", self.name, text),
            ParamDefault::Literal(value) => format!("{}={}", self.name, value),
        }
    }
}
