//! Error types for catalog extraction and descriptor loading.

use std::path::PathBuf;

/// Error raised while reflecting over a namespace.
///
/// Any of these aborts the whole extraction pass; no partial catalog is
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot reflect `{symbol}`: {reason}")]
    Reflection { symbol: String, reason: String },

    #[error("cannot linearize ancestors of `{class}`: inconsistent hierarchy")]
    InconsistentHierarchy { class: String },

    #[error("unknown category `{0}`")]
    UnknownCategory(String),
}

impl CatalogError {
    pub(crate) fn reflection(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::Reflection {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}

/// Error raised while loading a namespace descriptor.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML descriptor: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported descriptor format `{0}` (expected json, yaml or yml)")]
    UnsupportedFormat(String),

    #[error("class `{0}` is declared more than once")]
    DuplicateClass(String),

    #[error("class `{0}` inherits from itself")]
    CyclicBases(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
