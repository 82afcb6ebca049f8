//! godocjson Core - structural documentation for Go packages as JSON
//!
//! This crate provides the core functionality:
//! - AST: The parsed declaration and type expression model
//! - Position: File sets and source position resolution
//! - Doc: Type signature formatting and documentation flattening

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Syntax model - parsed Go declarations and type expressions
pub mod ast;

/// Source positions and file sets
pub mod position;

/// Documentation model, signature formatting and flattening
pub mod doc;

/// Error types shared by the whole crate
pub mod error;

/// Test utilities - builders for declarations and packages
pub mod testutil;

/// Convenience re-export of the flattener
pub use doc::Flattener;

/// Convenience re-export of the type formatter
pub use doc::TypeFormatter;

/// Convenience re-export of error types
pub use error::{DocError, DocResult};

/// Convenience re-export of position types
pub use position::{FileSet, Pos, Position, PositionResolver};
