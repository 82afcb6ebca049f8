//! Type expression nodes

use serde::{Deserialize, Serialize};

use super::{Ident, Pos, Positioned};

/// A type expression in source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeExpr {
    /// A plain type name (int, error, T)
    Ident(Ident),

    /// An array or slice type ([N]T, []T)
    Array {
        /// Length expression; `None` for slices
        #[serde(default, skip_serializing_if = "Option::is_none")]
        len: Option<Box<TypeExpr>>,
        /// Element type
        elem: Box<TypeExpr>,
    },

    /// A pointer type (*T)
    Pointer(Box<TypeExpr>),

    /// A variadic parameter type (...T)
    Ellipsis(Box<TypeExpr>),

    /// A struct type
    Struct(FieldList),

    /// An interface type; entries are methods or embedded interfaces
    Interface(FieldList),

    /// A qualified name (pkg.Name)
    Selector {
        /// The qualifier expression
        qualifier: Box<TypeExpr>,
        /// The selected member
        member: Ident,
    },

    /// A function type
    Func(FuncType),

    /// A map type (map[K]V)
    Map {
        /// Key type
        key: Box<TypeExpr>,
        /// Value type
        value: Box<TypeExpr>,
    },

    /// A channel type (chan T, chan<- T, <-chan T)
    Chan {
        /// Channel direction
        #[serde(default)]
        dir: ChanDir,
        /// Element type
        value: Box<TypeExpr>,
    },

    /// A parenthesized type ((T))
    Paren(Box<TypeExpr>),

    /// A generic instantiation (List[T], Pair[K, V])
    Index {
        /// The generic type being instantiated
        base: Box<TypeExpr>,
        /// Type arguments
        indices: Vec<TypeExpr>,
    },

    /// A literal, as found in array lengths
    BasicLit(String),

    /// A placeholder for source the parser could not make sense of
    Bad(String),
}

impl TypeExpr {
    /// Create a plain type name without position information
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(Ident::unpositioned(name))
    }

    /// Create a slice type ([]T)
    #[must_use]
    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Array {
            len: None,
            elem: Box::new(elem),
        }
    }

    /// Create a pointer type (*T)
    #[must_use]
    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    /// Create a variadic parameter type (...T)
    #[must_use]
    pub fn ellipsis(elem: TypeExpr) -> Self {
        TypeExpr::Ellipsis(Box::new(elem))
    }

    /// Create a qualified name (pkg.Name)
    #[must_use]
    pub fn selector(qualifier: impl Into<String>, member: impl Into<String>) -> Self {
        TypeExpr::Selector {
            qualifier: Box::new(TypeExpr::ident(qualifier)),
            member: Ident::unpositioned(member),
        }
    }

    /// Create a map type (map[K]V)
    #[must_use]
    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Create a channel type
    #[must_use]
    pub fn chan(dir: ChanDir, value: TypeExpr) -> Self {
        TypeExpr::Chan {
            dir,
            value: Box::new(value),
        }
    }

    /// Short name of the node kind, for diagnostics
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            TypeExpr::Ident(_) => "identifier",
            TypeExpr::Array { .. } => "array type",
            TypeExpr::Pointer(_) => "pointer type",
            TypeExpr::Ellipsis(_) => "variadic type",
            TypeExpr::Struct(_) => "struct type",
            TypeExpr::Interface(_) => "interface type",
            TypeExpr::Selector { .. } => "selector",
            TypeExpr::Func(_) => "function type",
            TypeExpr::Map { .. } => "map type",
            TypeExpr::Chan { .. } => "channel type",
            TypeExpr::Paren(_) => "parenthesized type",
            TypeExpr::Index { .. } => "generic instantiation",
            TypeExpr::BasicLit(_) => "literal",
            TypeExpr::Bad(_) => "bad expression",
        }
    }
}

/// Direction of a channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChanDir {
    /// Send-only (chan<- T)
    Send,
    /// Receive-only (<-chan T)
    Recv,
    /// Bidirectional (chan T)
    #[default]
    Both,
}

/// A struct field, interface entry, parameter group, or result group
///
/// A group such as `a, b int` is one field with two names. Embedded fields
/// and unnamed results have no names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Declared names, in source order
    #[serde(default)]
    pub names: Vec<Ident>,
    /// The field type
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl Field {
    /// Create a field with the given names
    #[must_use]
    pub fn new<I, S>(names: I, ty: TypeExpr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Ident::unpositioned).collect(),
            ty,
        }
    }

    /// Create a field without names (embedded field or bare result)
    #[must_use]
    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }
}

impl Positioned for Field {
    fn pos(&self) -> Pos {
        self.names.first().map_or(Pos::NONE, |name| name.pos)
    }
}

/// An ordered list of fields
pub type FieldList = Vec<Field>;

/// A function signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncType {
    /// Position of the `func` keyword, if present
    #[serde(default)]
    pub func: Pos,
    /// Parameter groups
    #[serde(default)]
    pub params: FieldList,
    /// Result groups; `None` when the function returns nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<FieldList>,
}

impl FuncType {
    /// Create a signature without position information
    #[must_use]
    pub fn new(params: FieldList, results: Option<FieldList>) -> Self {
        Self {
            func: Pos::NONE,
            params,
            results,
        }
    }
}

impl Positioned for FuncType {
    fn pos(&self) -> Pos {
        self.func
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_nested_type() {
        let json = r#"{"map":{"key":{"ident":{"name":"string"}},"value":{"pointer":{"ident":{"name":"T"}}}}}"#;
        let ty: TypeExpr = serde_json::from_str(json).unwrap();

        assert_eq!(
            ty,
            TypeExpr::map(TypeExpr::ident("string"), TypeExpr::pointer(TypeExpr::ident("T")))
        );
    }

    #[test]
    fn test_deserialize_field_group() {
        let json = r#"{"names":[{"name":"a"},{"name":"b"}],"type":{"ident":{"name":"int"}}}"#;
        let field: Field = serde_json::from_str(json).unwrap();

        assert_eq!(field, Field::new(["a", "b"], TypeExpr::ident("int")));
    }

    #[test]
    fn test_chan_dir_defaults_to_both() {
        let json = r#"{"chan":{"value":{"ident":{"name":"int"}}}}"#;
        let ty: TypeExpr = serde_json::from_str(json).unwrap();

        assert_eq!(ty, TypeExpr::chan(ChanDir::Both, TypeExpr::ident("int")));
    }
}
