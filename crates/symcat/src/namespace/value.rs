//! Runtime values seen through reflection (parameter defaults, plain bindings).

use serde_json::{Map, Number, Value};

/// An object the catalog can only see from the outside: a type name and
/// its printable representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueObject {
    pub type_name: String,
    pub repr: String,
}

/// A value as the reflected runtime holds it.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeValue {
    /// The platform's "no value" literal.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<RuntimeValue>),
    Map(Vec<(String, RuntimeValue)>),
    Object(OpaqueObject),
}

impl RuntimeValue {
    pub fn object(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        RuntimeValue::Object(OpaqueObject {
            type_name: type_name.into(),
            repr: repr.into(),
        })
    }

    /// Runtime type name, in the vocabulary of the reflected platform.
    pub fn type_name(&self) -> &str {
        match self {
            RuntimeValue::None => "NoneType",
            RuntimeValue::Bool(_) => "bool",
            RuntimeValue::Int(_) => "int",
            RuntimeValue::Float(_) => "float",
            RuntimeValue::Str(_) => "str",
            RuntimeValue::List(_) => "list",
            RuntimeValue::Map(_) => "dict",
            RuntimeValue::Object(obj) => &obj.type_name,
        }
    }

    /// JSON form of the value, or `None` if some part of it has no JSON
    /// representation (opaque objects, non-finite floats).
    pub fn to_json(&self) -> Option<Value> {
        Some(match self {
            RuntimeValue::None => Value::Null,
            RuntimeValue::Bool(b) => Value::Bool(*b),
            RuntimeValue::Int(i) => Value::Number((*i).into()),
            RuntimeValue::Float(f) => Value::Number(Number::from_f64(*f)?),
            RuntimeValue::Str(s) => Value::String(s.clone()),
            RuntimeValue::List(items) => Value::Array(
                items
                    .iter()
                    .map(RuntimeValue::to_json)
                    .collect::<Option<Vec<_>>>()?,
            ),
            RuntimeValue::Map(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key.clone(), value.to_json()?);
                }
                Value::Object(map)
            }
            RuntimeValue::Object(_) => return None,
        })
    }

    /// Printable representation, following the reflected platform's
    /// conventions (`None`, `True`, `'text'`, `1.0`).
    pub fn repr(&self) -> String {
        match self {
            RuntimeValue::None => "None".to_string(),
            RuntimeValue::Bool(true) => "True".to_string(),
            RuntimeValue::Bool(false) => "False".to_string(),
            RuntimeValue::Int(i) => i.to_string(),
            RuntimeValue::Float(f) => float_repr(*f),
            RuntimeValue::Str(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            RuntimeValue::List(items) => {
                let inner: Vec<String> = items.iter().map(RuntimeValue::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            RuntimeValue::Map(entries) => {
                let inner: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("'{}': {}", k, v.repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            RuntimeValue::Object(obj) => obj.repr.clone(),
        }
    }
}

fn float_repr(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let repr = if f > 0.0 { "inf" } else { "-inf" };
        repr.to_string()
    } else {
        // Debug keeps the trailing `.0` on integral floats
        format!("{:?}", f)
    }
}

impl From<bool> for RuntimeValue {
    fn from(value: bool) -> Self {
        RuntimeValue::Bool(value)
    }
}

impl From<i64> for RuntimeValue {
    fn from(value: i64) -> Self {
        RuntimeValue::Int(value)
    }
}

impl From<i32> for RuntimeValue {
    fn from(value: i32) -> Self {
        RuntimeValue::Int(value.into())
    }
}

impl From<f64> for RuntimeValue {
    fn from(value: f64) -> Self {
        RuntimeValue::Float(value)
    }
}

impl From<&str> for RuntimeValue {
    fn from(value: &str) -> Self {
        RuntimeValue::Str(value.to_string())
    }
}

impl From<String> for RuntimeValue {
    fn from(value: String) -> Self {
        RuntimeValue::Str(value)
    }
}

impl From<OpaqueObject> for RuntimeValue {
    fn from(value: OpaqueObject) -> Self {
        RuntimeValue::Object(value)
    }
}

impl<T: Into<RuntimeValue>> From<Option<T>> for RuntimeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RuntimeValue::None, Into::into)
    }
}

impl<T: Into<RuntimeValue>> From<Vec<T>> for RuntimeValue {
    fn from(value: Vec<T>) -> Self {
        RuntimeValue::List(value.into_iter().map(Into::into).collect())
    }
}
