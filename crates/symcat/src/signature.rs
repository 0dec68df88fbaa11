//! Signature extraction: declared parameters to catalog arguments.

use symcat_core::{ParamDefault, Parameter};

use crate::namespace::{RECEIVER, RuntimeValue, Signature};
use crate::{CatalogError, ExtractRules};

/// Resolve a declared default into its catalog form.
///
/// - no default -> `Absent`
/// - the none literal -> `NoneLiteral`
/// - a configured scalar wrapper type -> its text
/// - anything JSON can hold -> `Literal`
/// - anything else -> its text (never fails)
pub fn resolve_default(default: Option<&RuntimeValue>, rules: &ExtractRules) -> ParamDefault {
    let Some(value) = default else {
        return ParamDefault::Absent;
    };

    match value {
        RuntimeValue::None => ParamDefault::NoneLiteral,
        RuntimeValue::Object(obj) if rules.is_text_type(&obj.type_name) => {
            ParamDefault::Text(obj.repr.clone())
        }
        other => match other.to_json() {
            Some(json) => ParamDefault::Literal(json),
            None => {
                tracing::debug!(
                    type_name = other.type_name(),
                    "default has no serializable form, using its text"
                );
                ParamDefault::Text(other.repr())
            }
        },
    }
}

/// Arguments of a free function or method, in declaration order.
pub fn callable_arguments(
    symbol: &str,
    signature: &Signature,
    rules: &ExtractRules,
) -> Result<Vec<Parameter>, CatalogError> {
    let params = signature
        .params()
        .ok_or_else(|| CatalogError::reflection(symbol, "signature is not introspectable"))?;

    let mut arguments: Vec<Parameter> = Vec::with_capacity(params.len());
    for param in params {
        if arguments.iter().any(|a| a.name == param.name) {
            return Err(CatalogError::reflection(
                symbol,
                format!("duplicate parameter `{}`", param.name),
            ));
        }
        arguments.push(Parameter::new(
            param.name.clone(),
            resolve_default(param.default.as_ref(), rules),
        ));
    }
    Ok(arguments)
}

/// Arguments of a class constructor.
///
/// A non-empty list gets the receiver prepended; a constructor without
/// parameters yields `None` rather than an empty list.
pub fn constructor_arguments(
    symbol: &str,
    signature: &Signature,
    rules: &ExtractRules,
) -> Result<Option<Vec<Parameter>>, CatalogError> {
    let mut arguments = callable_arguments(symbol, signature, rules)?;
    if arguments.is_empty() {
        return Ok(None);
    }
    arguments.insert(0, Parameter::required(RECEIVER));
    Ok(Some(arguments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn foo_a_b_equals_5() {
        let sig = Signature::new().param("a").param_default("b", 5);
        let args = callable_arguments("foo", &sig, &ExtractRules::default()).unwrap();
        assert_eq!(
            args,
            vec![
                Parameter::required("a"),
                Parameter::new("b", ParamDefault::Literal(json!(5))),
            ]
        );
    }

    #[test]
    fn none_default_is_none_literal() {
        let sig = Signature::new().param_default("seed", RuntimeValue::None);
        let args = callable_arguments("f", &sig, &ExtractRules::default()).unwrap();
        assert_eq!(args[0].default, ParamDefault::NoneLiteral);
        assert_eq!(serde_json::to_value(&args[0]).unwrap()["default"], json!("None"));
    }

    #[test]
    fn text_types_render_as_text() {
        let sig = Signature::new().param_default(
            "dtype",
            RuntimeValue::object("DType", "<dtype: 'float32'>"),
        );
        let args = callable_arguments("Zeros", &sig, &ExtractRules::default()).unwrap();
        assert_eq!(args[0].default, ParamDefault::Text("<dtype: 'float32'>".into()));
    }

    #[test]
    fn unknown_objects_fall_back_to_text() {
        let sig = Signature::new()
            .param_default("fn", RuntimeValue::object("function", "<function relu>"))
            .param_default("eps", f64::NAN);
        let args = callable_arguments("f", &sig, &ExtractRules::default()).unwrap();
        assert_eq!(args[0].default, ParamDefault::Text("<function relu>".into()));
        assert_eq!(args[1].default, ParamDefault::Text("nan".into()));
    }

    #[test]
    fn constructor_prepends_receiver() {
        let sig = Signature::new().param_default("l1", 0.01);
        let args = constructor_arguments("L1", &sig, &ExtractRules::default())
            .unwrap()
            .unwrap();
        assert_eq!(args[0], Parameter::required("self"));
        assert_eq!(args[1].name, "l1");
    }

    #[test]
    fn empty_constructor_is_absent() {
        let args = constructor_arguments("NonNeg", &Signature::new(), &ExtractRules::default());
        assert_eq!(args.unwrap(), None);
    }

    #[test]
    fn opaque_signature_is_reflection_failure() {
        let err = callable_arguments("native", &Signature::opaque(), &ExtractRules::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::Reflection { ref symbol, .. } if symbol == "native"));
    }

    #[test]
    fn duplicate_parameters_fail() {
        let sig = Signature::new().param("x").param("x");
        assert!(callable_arguments("f", &sig, &ExtractRules::default()).is_err());
    }
}
