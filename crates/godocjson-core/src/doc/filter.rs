//! Excluding source files by name pattern
//!
//! The filter matches the base name of each file. Pruning a package removes
//! the excluded file names and every declaration or note located in one of
//! those files, as if the files had never been parsed.

use std::path::Path;

use regex::Regex;

use crate::ast::Positioned;
use crate::error::{DocError, DocResult};
use crate::position::{Pos, PositionResolver};

use super::model::{DocFunc, DocPackage, DocType, DocValue};

const BUG_MARKER: &str = "BUG";

/// A compiled exclude pattern
#[derive(Debug, Clone)]
pub struct ExcludeFilter {
    pattern: Regex,
}

impl ExcludeFilter {
    /// Compile an exclude pattern
    ///
    /// An empty pattern means "exclude nothing" and yields `None`.
    pub fn new(pattern: &str) -> DocResult<Option<Self>> {
        if pattern.is_empty() {
            return Ok(None);
        }

        let pattern = Regex::new(pattern).map_err(|e| DocError::InvalidFilter {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(Self { pattern }))
    }

    /// The pattern as written
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Check whether a file is excluded, judging by its base name
    #[must_use]
    pub fn is_excluded(&self, filename: &str) -> bool {
        let base = Path::new(filename)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(filename);
        self.pattern.is_match(base)
    }

    /// Remove everything that lives in an excluded file
    ///
    /// The deprecated bug list is rebuilt from the remaining BUG notes.
    pub fn prune<R>(&self, package: &mut DocPackage, resolver: &R) -> DocResult<()>
    where
        R: PositionResolver + ?Sized,
    {
        let before = package.decl_count();
        let pruner = Pruner {
            filter: self,
            resolver,
        };

        let had_bug_notes = package.notes.contains_key(BUG_MARKER);
        package.filenames.retain(|name| !self.is_excluded(name));
        for group in package.notes.values_mut() {
            pruner.retain(group, |note| note.pos, || "note".to_string())?;
        }
        package.notes.retain(|_, group| !group.is_empty());
        pruner.retain_values(&mut package.consts)?;
        pruner.retain_values(&mut package.vars)?;
        pruner.retain_funcs(&mut package.funcs)?;
        pruner.retain_types(&mut package.types)?;
        if had_bug_notes {
            package.bugs = package
                .notes
                .get(BUG_MARKER)
                .map(|bugs| bugs.iter().map(|note| note.body.clone()).collect())
                .unwrap_or_default();
        }

        tracing::debug!(
            pattern = %self.as_str(),
            removed = before - package.decl_count(),
            "pruned excluded files"
        );
        Ok(())
    }
}

struct Pruner<'a, R: ?Sized> {
    filter: &'a ExcludeFilter,
    resolver: &'a R,
}

impl<R> Pruner<'_, R>
where
    R: PositionResolver + ?Sized,
{
    fn is_excluded(&self, pos: Pos, describe: impl FnOnce() -> String) -> DocResult<bool> {
        let position = self
            .resolver
            .resolve(pos)
            .ok_or_else(|| DocError::unresolved(pos, describe()))?;
        Ok(self.filter.is_excluded(&position.filename))
    }

    fn retain<T>(
        &self,
        items: &mut Vec<T>,
        pos: impl Fn(&T) -> Pos,
        describe: impl Fn() -> String,
    ) -> DocResult<()> {
        let mut kept = Vec::with_capacity(items.len());
        for item in items.drain(..) {
            if !self.is_excluded(pos(&item), &describe)? {
                kept.push(item);
            }
        }
        *items = kept;
        Ok(())
    }

    fn retain_values(&self, values: &mut Vec<DocValue>) -> DocResult<()> {
        self.retain(values, |value| value.decl.tok_pos, || "value".to_string())
    }

    fn retain_funcs(&self, funcs: &mut Vec<DocFunc>) -> DocResult<()> {
        self.retain(funcs, |func| func.decl.pos(), || "func".to_string())
    }

    fn retain_types(&self, types: &mut Vec<DocType>) -> DocResult<()> {
        self.retain(types, |ty| ty.decl.tok_pos, || "type".to_string())?;
        for ty in types.iter_mut() {
            self.retain_values(&mut ty.consts)?;
            self.retain_values(&mut ty.vars)?;
            self.retain_funcs(&mut ty.funcs)?;
            self.retain_funcs(&mut ty.methods)?;
        }
        Ok(())
    }
}
