//! Core record types for symcat catalogs.
//!
//! This crate defines the vocabulary of a catalog - function and class
//! records, their parameters and resolved defaults. These types are used by:
//! - `symcat` for extraction
//! - `symcat-output` and `symcat-cli` for rendering

mod param;
mod record;

pub use param::{NONE_MARKER, ParamDefault, Parameter};
pub use record::{ClassRecord, FunctionRecord, SymbolRecord};
