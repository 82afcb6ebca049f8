//! Documentation flattening for parsed Go packages
//!
//! This module turns the documentation model of one package into plain,
//! serializable records, rendering every parameter and result type as a
//! canonical signature string.

mod filter;
mod flatten;
mod model;
mod options;
mod records;
mod signature;

pub use filter::ExcludeFilter;
pub use flatten::Flattener;
pub use model::{DeclarationDump, DocFunc, DocNote, DocPackage, DocType, DocValue};
pub use options::{FlattenOptions, DEFAULT_PARALLEL_THRESHOLD};
pub use records::{Func, FuncParam, Note, Package, Type, Value, FUNC_KIND, PACKAGE_KIND, TYPE_KIND};
pub use signature::TypeFormatter;
