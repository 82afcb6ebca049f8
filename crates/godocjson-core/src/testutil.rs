//! Test utilities for godocjson
//!
//! This module provides builders for declarations, packages and file sets,
//! so tests can describe a package without going through a Go parser.

use crate::ast::{Field, FieldList, FuncDecl, FuncType, GenDecl, Ident, Token, TypeExpr};
use crate::doc::{DocFunc, DocPackage, DocType, DocValue, Flattener};
use crate::position::{FileSet, Pos};

/// Result type for test helpers
pub type TestResult<T> = Result<T, String>;

/// Build a file set from `(name, source)` pairs, in order
#[must_use]
pub fn file_set(files: &[(&str, &str)]) -> FileSet {
    let mut fset = FileSet::new();
    for (name, source) in files {
        fset.add_source(*name, source);
    }
    fset
}

/// Position of the first byte of `line` in the named file
///
/// Returns [`Pos::NONE`] if the file or line does not exist, which the
/// flattener then reports as an unresolved position.
#[must_use]
pub fn line_pos(fset: &FileSet, filename: &str, line: usize) -> Pos {
    fset.file(filename)
        .and_then(|file| file.line_start(line))
        .unwrap_or(Pos::NONE)
}

/// A plain type name
#[must_use]
pub fn ident(name: &str) -> TypeExpr {
    TypeExpr::ident(name)
}

/// A parameter or result group, e.g. `group(&["a", "b"], ident("int"))` for `a, b int`
#[must_use]
pub fn group(names: &[&str], ty: TypeExpr) -> Field {
    Field::new(names.iter().copied(), ty)
}

/// A free function declared at `pos`
#[must_use]
pub fn func(name: &str, pos: Pos, params: FieldList, results: Option<FieldList>) -> DocFunc {
    let ty = FuncType {
        func: pos,
        params,
        results,
    };
    DocFunc {
        doc: String::new(),
        name: name.to_string(),
        decl: FuncDecl::new(Ident::unpositioned(name), ty),
        recv: String::new(),
        orig: String::new(),
    }
}

/// A method on `recv` ("T" or "*T") declared at `pos`
#[must_use]
pub fn method(
    recv: &str,
    name: &str,
    pos: Pos,
    params: FieldList,
    results: Option<FieldList>,
) -> DocFunc {
    let recv_type = match recv.strip_prefix('*') {
        Some(base) => TypeExpr::pointer(ident(base)),
        None => ident(recv),
    };
    let mut doc_func = func(name, pos, params, results);
    doc_func.decl = doc_func.decl.with_recv(vec![group(&["r"], recv_type)]);
    doc_func.recv = recv.to_string();
    doc_func.orig = recv.to_string();
    doc_func
}

/// A `const` or `var` declaration with the keyword at `pos`
#[must_use]
pub fn value(tok: Token, names: &[&str], pos: Pos) -> DocValue {
    DocValue {
        doc: String::new(),
        names: names.iter().map(|name| (*name).to_string()).collect(),
        decl: GenDecl::new(tok, pos),
    }
}

/// A type declaration with the keyword at `pos` and nothing associated yet
#[must_use]
pub fn type_decl(name: &str, pos: Pos) -> DocType {
    DocType {
        doc: String::new(),
        name: name.to_string(),
        decl: GenDecl::new(Token::Type, pos),
        consts: Vec::new(),
        vars: Vec::new(),
        funcs: Vec::new(),
        methods: Vec::new(),
    }
}

/// An empty package made of the files in `fset`
#[must_use]
pub fn package(name: &str, import_path: &str, fset: &FileSet) -> DocPackage {
    let mut package = DocPackage::new(name, import_path);
    package.filenames = fset.files.iter().map(|file| file.name.clone()).collect();
    package
}

/// Flatten a package and render it as a JSON value
///
/// # Errors
/// Returns error if flattening or serialization fails
pub fn flatten_json(package: &DocPackage, fset: &FileSet) -> TestResult<serde_json::Value> {
    let flattened =
        Flattener::flatten(package, fset).map_err(|e| format!("Flatten error: {e}"))?;
    serde_json::to_value(flattened).map_err(|e| format!("Serialize error: {e}"))
}
