//! Declaration nodes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FieldList, FuncType, Ident, Pos, Positioned};

/// The keyword that introduces a general declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Token {
    /// `const`
    Const,
    /// `var`
    Var,
    /// `type`
    Type,
    /// `import`
    Import,
}

impl Token {
    /// The keyword as written in source
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Token::Const => "const",
            Token::Var => "var",
            Token::Type => "type",
            Token::Import => "import",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `const`, `var`, `type` or `import` declaration, possibly grouped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenDecl {
    /// Declaration keyword
    pub tok: Token,
    /// Position of the keyword
    #[serde(default)]
    pub tok_pos: Pos,
}

impl GenDecl {
    /// Create a declaration header
    #[must_use]
    pub const fn new(tok: Token, tok_pos: Pos) -> Self {
        Self { tok, tok_pos }
    }
}

impl Positioned for GenDecl {
    fn pos(&self) -> Pos {
        self.tok_pos
    }
}

/// A function or method declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    /// Receiver; `None` for free functions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recv: Option<FieldList>,
    /// Function name
    pub name: Ident,
    /// Signature
    #[serde(rename = "type")]
    pub ty: FuncType,
}

impl FuncDecl {
    /// Create a free function declaration
    #[must_use]
    pub fn new(name: Ident, ty: FuncType) -> Self {
        Self {
            recv: None,
            name,
            ty,
        }
    }

    /// Attach a receiver, making this a method
    #[must_use]
    pub fn with_recv(mut self, recv: FieldList) -> Self {
        self.recv = Some(recv);
        self
    }

    /// Returns true if this declares a method
    #[must_use]
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }
}

impl Positioned for FuncDecl {
    /// A function declaration starts at its `func` keyword
    fn pos(&self) -> Pos {
        self.ty.pos()
    }
}
