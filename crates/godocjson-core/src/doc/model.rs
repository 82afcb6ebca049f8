//! The documentation model handed over by the upstream doc builder
//!
//! This mirrors what a `go/doc` style builder produces for one package:
//! declarations grouped by kind, with types owning their associated
//! constants, variables, constructors and methods.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ast::{FuncDecl, GenDecl, Pos};
use crate::error::{DocError, DocResult};
use crate::position::FileSet;

/// Documentation for a `const` or `var` declaration
///
/// One value covers a whole declaration, so `const (a, b = 1, 2)` is a single
/// value with two names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocValue {
    /// Doc comment text
    #[serde(default)]
    pub doc: String,
    /// Declared names in declaration order
    pub names: Vec<String>,
    /// The declaration itself
    pub decl: GenDecl,
}

/// Documentation for a function or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocFunc {
    /// Doc comment text
    #[serde(default)]
    pub doc: String,
    /// Function name
    pub name: String,
    /// The declaration itself
    pub decl: FuncDecl,
    /// Actual receiver type ("T" or "*T"); empty for free functions
    #[serde(default)]
    pub recv: String,
    /// Original receiver type ("T" or "*T"); differs from `recv` for promoted methods
    #[serde(default)]
    pub orig: String,
}

/// Documentation for a type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocType {
    /// Doc comment text
    #[serde(default)]
    pub doc: String,
    /// Type name
    pub name: String,
    /// The declaration itself
    pub decl: GenDecl,
    /// Constants of (mostly) this type
    #[serde(default)]
    pub consts: Vec<DocValue>,
    /// Variables of (mostly) this type
    #[serde(default)]
    pub vars: Vec<DocValue>,
    /// Functions returning this type
    #[serde(default)]
    pub funcs: Vec<DocFunc>,
    /// Methods, including those promoted from embedded fields
    #[serde(default)]
    pub methods: Vec<DocFunc>,
}

/// A marked comment such as `// BUG(uid): body`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocNote {
    /// Start of the comment containing the marker
    pub pos: Pos,
    /// End of the comment containing the marker
    pub end: Pos,
    /// Identifier found with the marker
    #[serde(default)]
    pub uid: String,
    /// Note body text
    #[serde(default)]
    pub body: String,
}

/// Documentation for one package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocPackage {
    /// Package doc comment
    #[serde(default)]
    pub doc: String,
    /// Package name
    pub name: String,
    /// Import path
    #[serde(default)]
    pub import_path: String,
    /// Imported paths
    #[serde(default)]
    pub imports: Vec<String>,
    /// Source files making up the package
    #[serde(default)]
    pub filenames: Vec<String>,
    /// Notes keyed by marker ("BUG", "TODO", ...)
    #[serde(default)]
    pub notes: BTreeMap<String, Vec<DocNote>>,
    /// Bodies of the BUG notes; superseded by `notes`
    #[serde(default)]
    pub bugs: Vec<String>,
    /// Package-level constants
    #[serde(default)]
    pub consts: Vec<DocValue>,
    /// Package-level types
    #[serde(default)]
    pub types: Vec<DocType>,
    /// Package-level variables
    #[serde(default)]
    pub vars: Vec<DocValue>,
    /// Package-level functions
    #[serde(default)]
    pub funcs: Vec<DocFunc>,
}

impl DocPackage {
    /// Create an empty package
    #[must_use]
    pub fn new(name: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import_path: import_path.into(),
            ..Self::default()
        }
    }

    /// Number of top-level declarations, associated ones included
    #[must_use]
    pub fn decl_count(&self) -> usize {
        let associated: usize = self
            .types
            .iter()
            .map(|t| t.consts.len() + t.vars.len() + t.funcs.len() + t.methods.len())
            .sum();
        self.consts.len() + self.types.len() + self.vars.len() + self.funcs.len() + associated
    }
}

/// Everything the upstream parser produced for one directory
///
/// This is the document the CLI reads: the positions of every parsed file
/// plus the documentation model of each package found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationDump {
    /// Positions of every parsed file
    #[serde(default)]
    pub file_set: FileSet,
    /// Packages found
    #[serde(default)]
    pub packages: Vec<DocPackage>,
}

impl DeclarationDump {
    /// Decode a dump from JSON text
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Split the dump into its file set and its only package
    ///
    /// Returns `None` for the package when nothing was parsed, and fails if
    /// more than one package is present.
    pub fn into_single_package(self) -> DocResult<(FileSet, Option<DocPackage>)> {
        let DeclarationDump {
            file_set,
            mut packages,
        } = self;

        if packages.len() > 1 {
            return Err(DocError::MultiplePackages {
                names: packages.into_iter().map(|p| p.name).collect(),
            });
        }

        Ok((file_set, packages.pop()))
    }
}
