//! Error types for signature formatting and documentation flattening

use thiserror::Error;

use crate::position::Pos;

/// Result type for documentation operations
pub type DocResult<T> = Result<T, DocError>;

/// Errors that abort a documentation run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    #[error("unsupported type expression: {raw}")]
    UnsupportedType {
        /// Debug rendering of the offending node
        raw: String,
    },

    #[error("cannot resolve source position {pos} of {decl}")]
    UnresolvedPosition {
        /// The position the resolver rejected
        pos: Pos,
        /// What was being converted, e.g. `func Add`
        decl: String,
    },

    #[error("multiple packages found in one grouping: {}", .names.join(", "))]
    MultiplePackages {
        /// Names of every package present
        names: Vec<String>,
    },

    #[error("invalid exclude pattern '{pattern}': {message}")]
    InvalidFilter { pattern: String, message: String },
}

impl DocError {
    /// Create an unsupported type error from any debuggable node
    #[must_use]
    pub fn unsupported(node: &impl std::fmt::Debug) -> Self {
        DocError::UnsupportedType {
            raw: format!("{node:?}"),
        }
    }

    /// Create an unresolved position error
    #[must_use]
    pub fn unresolved(pos: Pos, decl: impl Into<String>) -> Self {
        DocError::UnresolvedPosition {
            pos,
            decl: decl.into(),
        }
    }
}
