//! Syntax model for parsed Go declarations
//!
//! These are the nodes the upstream parser hands over. They are read-only to
//! this crate: the formatter and flattener only walk them.

mod decl;
mod types;

pub use decl::*;
pub use types::*;

use serde::{Deserialize, Serialize};

// Re-export Pos for convenience
pub use crate::position::Pos;

/// A trait for syntax nodes that carry a source position
pub trait Positioned {
    /// Returns the position of the node's first token
    fn pos(&self) -> Pos;
}

/// An identifier with its source position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    /// The identifier name
    pub name: String,
    /// Source position
    #[serde(default)]
    pub pos: Pos,
}

impl Ident {
    /// Create a new identifier
    #[must_use]
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }

    /// Create an identifier without position information
    #[must_use]
    pub fn unpositioned(name: impl Into<String>) -> Self {
        Self::new(name, Pos::NONE)
    }
}

impl Positioned for Ident {
    fn pos(&self) -> Pos {
        self.pos
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
