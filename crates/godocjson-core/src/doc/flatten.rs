//! Documentation flattener - turns a package doc model into output records
//!
//! Every record is self-contained: the owning package's name and import path
//! and the resolved source location are copied into each one. Lists keep the
//! order of the doc model.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::ast::{Field, Positioned};
use crate::error::{DocError, DocResult};
use crate::position::{Pos, Position, PositionResolver};

use super::model::{DocFunc, DocNote, DocPackage, DocType, DocValue};
use super::options::FlattenOptions;
use super::records::{
    Func, FuncParam, Note, Package, Type, Value, FUNC_KIND, PACKAGE_KIND, TYPE_KIND,
};
use super::signature::TypeFormatter;

/// Converts doc model declarations of one package into output records
pub struct Flattener<'a, R: ?Sized> {
    package_name: &'a str,
    import_path: &'a str,
    resolver: &'a R,
    options: FlattenOptions,
}

impl<'a, R> Flattener<'a, R>
where
    R: PositionResolver + Sync + ?Sized,
{
    /// Create a flattener for declarations owned by the given package
    #[must_use]
    pub fn new(package_name: &'a str, import_path: &'a str, resolver: &'a R) -> Self {
        Self {
            package_name,
            import_path,
            resolver,
            options: FlattenOptions::default(),
        }
    }

    /// Set the flatten options
    #[must_use]
    pub fn with_options(mut self, options: FlattenOptions) -> Self {
        self.options = options;
        self
    }

    /// Flatten a whole package with default options
    ///
    /// # Errors
    /// Fails on the first declaration whose position cannot be resolved or
    /// whose signature contains an unsupported type expression.
    pub fn flatten(package: &'a DocPackage, resolver: &'a R) -> DocResult<Package> {
        Self::flatten_with_options(package, resolver, FlattenOptions::default())
    }

    /// Flatten a whole package
    pub fn flatten_with_options(
        package: &'a DocPackage,
        resolver: &'a R,
        options: FlattenOptions,
    ) -> DocResult<Package> {
        tracing::debug!(
            package = %package.name,
            import_path = %package.import_path,
            decls = package.decl_count(),
            "flattening package"
        );

        let flattener =
            Self::new(&package.name, &package.import_path, resolver).with_options(options);

        Ok(Package {
            kind: PACKAGE_KIND.to_string(),
            doc: package.doc.clone(),
            name: package.name.clone(),
            import_path: package.import_path.clone(),
            imports: package.imports.clone(),
            filenames: package.filenames.clone(),
            notes: Self::convert_notes(&package.notes),
            bugs: package.bugs.clone(),
            consts: flattener.convert_all(&package.consts, Self::convert_value)?,
            types: flattener.convert_all(&package.types, Self::convert_type)?,
            vars: flattener.convert_all(&package.vars, Self::convert_value)?,
            funcs: flattener.convert_all(&package.funcs, Self::convert_func)?,
        })
    }

    /// Convert a function or method
    pub fn convert_func(&self, func: &DocFunc) -> DocResult<Func> {
        tracing::trace!(
            name = %func.name,
            method = func.decl.is_method(),
            recv = %func.recv,
            "converting func"
        );

        let position = self.resolve(func.decl.pos(), || format!("func {}", func.name))?;
        let params = Self::expand_fields(&func.decl.ty.params, false)?;
        let results = match &func.decl.ty.results {
            Some(results) => Self::expand_fields(results, true)?,
            None => Vec::new(),
        };

        Ok(Func {
            doc: func.doc.clone(),
            name: func.name.clone(),
            package_name: self.package_name.to_string(),
            package_import_path: self.import_path.to_string(),
            kind: FUNC_KIND.to_string(),
            filename: position.filename,
            line: position.line,
            params,
            results,
            recv: func.recv.clone(),
            orig: func.orig.clone(),
        })
    }

    /// Convert a `const` or `var` declaration
    ///
    /// The position is that of the declaration keyword, not of the first name.
    pub fn convert_value(&self, value: &DocValue) -> DocResult<Value> {
        let position = self.resolve(value.decl.tok_pos, || {
            format!("{} {}", value.decl.tok, value.names.join(", "))
        })?;

        Ok(Value {
            package_name: self.package_name.to_string(),
            package_import_path: self.import_path.to_string(),
            doc: value.doc.clone(),
            names: value.names.clone(),
            kind: value.decl.tok.to_string(),
            filename: position.filename,
            line: position.line,
        })
    }

    /// Convert a type along with its associated declarations
    pub fn convert_type(&self, ty: &DocType) -> DocResult<Type> {
        let position = self.resolve(ty.decl.tok_pos, || format!("type {}", ty.name))?;

        Ok(Type {
            package_name: self.package_name.to_string(),
            package_import_path: self.import_path.to_string(),
            doc: ty.doc.clone(),
            name: ty.name.clone(),
            kind: TYPE_KIND.to_string(),
            filename: position.filename,
            line: position.line,
            consts: self.convert_all(&ty.consts, Self::convert_value)?,
            vars: self.convert_all(&ty.vars, Self::convert_value)?,
            funcs: self.convert_all(&ty.funcs, Self::convert_func)?,
            methods: self.convert_all(&ty.methods, Self::convert_func)?,
        })
    }

    /// Copy every note group, keeping the order within each group
    pub fn convert_notes(notes: &BTreeMap<String, Vec<DocNote>>) -> BTreeMap<String, Vec<Note>> {
        notes
            .iter()
            .map(|(marker, group)| {
                let group = group
                    .iter()
                    .map(|note| Note {
                        pos: note.pos,
                        end: note.end,
                        uid: note.uid.clone(),
                        body: note.body.clone(),
                    })
                    .collect();
                (marker.clone(), group)
            })
            .collect()
    }

    /// Expand parameter or result groups into one record per name
    ///
    /// `a, b int` becomes two records sharing the type. A group without
    /// names yields nothing for parameters, and exactly one record with an
    /// empty name for results, as in the bare result of `func F() string`.
    fn expand_fields(fields: &[Field], keep_unnamed: bool) -> DocResult<Vec<FuncParam>> {
        let mut params = Vec::with_capacity(fields.len());
        for field in fields {
            let ty = TypeFormatter::format(&field.ty)?;
            if field.names.is_empty() {
                if keep_unnamed {
                    params.push(FuncParam::new(ty, ""));
                }
            } else {
                params.extend(
                    field
                        .names
                        .iter()
                        .map(|name| FuncParam::new(ty.clone(), name.name.clone())),
                );
            }
        }
        Ok(params)
    }

    fn convert_all<T, U>(
        &self,
        items: &[T],
        convert: fn(&Self, &T) -> DocResult<U>,
    ) -> DocResult<Vec<U>>
    where
        T: Sync,
        U: Send,
    {
        if self.options.should_parallelize(items.len()) {
            items.par_iter().map(|item| convert(self, item)).collect()
        } else {
            items.iter().map(|item| convert(self, item)).collect()
        }
    }

    fn resolve(&self, pos: Pos, describe: impl FnOnce() -> String) -> DocResult<Position> {
        self.resolver
            .resolve(pos)
            .ok_or_else(|| DocError::unresolved(pos, describe()))
    }
}
