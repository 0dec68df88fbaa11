//! Class metadata extraction.

use symcat_core::ClassRecord;

use crate::namespace::ClassInfo;
use crate::signature::{callable_arguments, constructor_arguments};
use crate::{CatalogError, ExtractRules};

/// Options for class extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassOptions {
    /// Fill `outputs` with the return annotations of the invocation entry
    /// point.
    pub call_annotations: bool,
}

/// Build the record for a class bound under its canonical name.
///
/// `aliases` is left empty; the alias pass fills it.
pub fn class_record(
    name: &str,
    class: &ClassInfo,
    rules: &ExtractRules,
    options: ClassOptions,
) -> Result<ClassRecord, CatalogError> {
    let mro = class.mro()?;
    let base = mro
        .get(1)
        .map(|ancestor| ancestor.name().to_string())
        .unwrap_or_else(|| rules.root_type.clone());

    let is_abstract = rules.is_known_abstract(name)
        || rules.is_known_abstract(class.name())
        || class.is_abstract()?;

    let call = class.resolve_member(&rules.invocation_member)?;

    let (arguments, inputs) = if is_abstract {
        (None, None)
    } else {
        let arguments = constructor_arguments(name, class.constructor(), rules)?;
        let inputs = call
            .map(|member| {
                let symbol = format!("{}.{}", name, member.name);
                callable_arguments(&symbol, &member.signature, rules)
            })
            .transpose()?;
        (arguments, inputs)
    };

    let outputs = options.call_annotations.then(|| match call {
        Some(member) if !is_abstract => member.signature.return_annotations().to_vec(),
        _ => Vec::new(),
    });

    Ok(ClassRecord {
        name: name.to_string(),
        base,
        docstring: class.docstring().map(str::to_string),
        arguments,
        is_abstract,
        outputs,
        inputs,
        file: rules.module_file(class.module()),
        aliases: None,
    })
}
