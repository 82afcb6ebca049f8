//! Flattened documentation records
//!
//! Field order and key names here are the output format: consumers of the
//! JSON rely on both.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ast::Pos;

/// Discriminant of [`Func`] records
pub const FUNC_KIND: &str = "func";
/// Discriminant of [`Type`] records
pub const TYPE_KIND: &str = "type";
/// Discriminant of [`Package`] records
pub const PACKAGE_KIND: &str = "package";

/// A function parameter or result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncParam {
    /// Canonical type signature
    #[serde(rename = "type")]
    pub ty: String,
    /// Parameter name; empty for unnamed results
    pub name: String,
}

impl FuncParam {
    /// Create a parameter record
    #[must_use]
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// A function or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Func {
    pub doc: String,
    pub name: String,
    pub package_name: String,
    pub package_import_path: String,
    /// Always `"func"`
    #[serde(rename = "type")]
    pub kind: String,
    pub filename: String,
    pub line: usize,
    #[serde(rename = "parameters")]
    pub params: Vec<FuncParam>,
    pub results: Vec<FuncParam>,
    /// Actual receiver "T" or "*T"; empty for free functions
    pub recv: String,
    /// Original receiver "T" or "*T"
    pub orig: String,
}

/// A `const` or `var` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    pub package_name: String,
    pub package_import_path: String,
    pub doc: String,
    /// Declared names in declaration order
    pub names: Vec<String>,
    /// `"const"` or `"var"`
    #[serde(rename = "type")]
    pub kind: String,
    pub filename: String,
    pub line: usize,
}

/// A type declaration with its associated declarations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    pub package_name: String,
    pub package_import_path: String,
    pub doc: String,
    pub name: String,
    /// Always `"type"`
    #[serde(rename = "type")]
    pub kind: String,
    pub filename: String,
    pub line: usize,
    pub consts: Vec<Value>,
    pub vars: Vec<Value>,
    /// Functions returning this type
    pub funcs: Vec<Func>,
    /// Methods, including promoted ones
    pub methods: Vec<Func>,
}

/// A marked note comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub pos: Pos,
    pub end: Pos,
    pub uid: String,
    pub body: String,
}

/// The root record for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Always `"package"`
    #[serde(rename = "type")]
    pub kind: String,
    pub doc: String,
    pub name: String,
    pub import_path: String,
    pub imports: Vec<String>,
    pub filenames: Vec<String>,
    pub notes: BTreeMap<String, Vec<Note>>,
    /// Deprecated: BUG note bodies, kept for older consumers
    pub bugs: Vec<String>,
    pub consts: Vec<Value>,
    pub types: Vec<Type>,
    pub vars: Vec<Value>,
    pub funcs: Vec<Func>,
}
