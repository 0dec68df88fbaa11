//! Catalog record types.

use serde::Serialize;

use crate::Parameter;

/// A function exported by a namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionRecord {
    pub name: String,
    pub arguments: Vec<Parameter>,
    pub docstring: Option<String>,
    /// Path synthesized from the declaring module (`a.b.c` -> `a/b/c.py`).
    /// Not guaranteed to exist on disk.
    pub file: String,
}

/// A class exported by a namespace under its canonical name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassRecord {
    pub name: String,
    /// Immediate ancestor in method resolution order.
    pub base: String,
    pub docstring: Option<String>,
    /// Constructor parameters. `None` for abstract classes and for
    /// constructors without parameters.
    pub arguments: Option<Vec<Parameter>>,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    /// Return annotations of the invocation entry point, only filled when
    /// call annotations were requested.
    pub outputs: Option<Vec<String>>,
    /// Parameters of the invocation entry point, if the class has one.
    pub inputs: Option<Vec<Parameter>>,
    pub file: String,
    /// Other binding names of the same class object, first-seen order.
    pub aliases: Option<Vec<String>>,
}

impl ClassRecord {
    /// Replace the alias list.
    ///
    /// An empty list clears the field back to `None`.
    pub fn set_aliases<I, S>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
        self.aliases = if aliases.is_empty() {
            None
        } else {
            Some(aliases)
        };
    }

    /// Append one alias, skipping names already present.
    pub fn add_alias(&mut self, alias: impl Into<String>) {
        let alias = alias.into();
        let aliases = self.aliases.get_or_insert_with(Vec::new);
        if !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }
}

/// Either kind of catalog record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SymbolRecord {
    Function(FunctionRecord),
    Class(ClassRecord),
}

impl SymbolRecord {
    pub fn name(&self) -> &str {
        match self {
            SymbolRecord::Function(f) => &f.name,
            SymbolRecord::Class(c) => &c.name,
        }
    }

    pub fn docstring(&self) -> Option<&str> {
        match self {
            SymbolRecord::Function(f) => f.docstring.as_deref(),
            SymbolRecord::Class(c) => c.docstring.as_deref(),
        }
    }

    pub fn file(&self) -> &str {
        match self {
            SymbolRecord::Function(f) => &f.file,
            SymbolRecord::Class(c) => &c.file,
        }
    }
}

impl From<FunctionRecord> for SymbolRecord {
    fn from(record: FunctionRecord) -> Self {
        SymbolRecord::Function(record)
    }
}

impl From<ClassRecord> for SymbolRecord {
    fn from(record: ClassRecord) -> Self {
        SymbolRecord::Class(record)
    }
}
