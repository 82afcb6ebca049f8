//! Canonical type signatures
//!
//! Renders a type expression as the compact string used in the JSON output.
//! The rendering is a pure function of the node's shape, so two equal nodes
//! always produce the same bytes, while equivalent types spelled differently
//! do not.

use crate::ast::{ChanDir, Field, FuncType, TypeExpr};
use crate::error::{DocError, DocResult};

/// Formats type expressions into canonical signatures
pub struct TypeFormatter;

impl TypeFormatter {
    /// Render a type expression
    ///
    /// Member names of structs, interfaces and function signatures are not
    /// part of the result, and array lengths are dropped (`[4]T` renders as
    /// `[]T`).
    pub fn format(ty: &TypeExpr) -> DocResult<String> {
        match ty {
            TypeExpr::Ident(ident) => Ok(ident.name.clone()),
            TypeExpr::Array { elem, .. } => Ok(format!("[]{}", Self::format(elem)?)),
            TypeExpr::Pointer(inner) => Ok(format!("*{}", Self::format(inner)?)),
            TypeExpr::Ellipsis(elem) => Ok(format!("...{}", Self::format(elem)?)),
            TypeExpr::Struct(fields) => Ok(format!("struct{{{}}}", Self::join_types(fields)?)),
            TypeExpr::Interface(methods) => {
                Ok(format!("interface{{{}}}", Self::join_types(methods)?))
            }
            TypeExpr::Selector { qualifier, member } => {
                Ok(format!("{}.{}", Self::format(qualifier)?, member.name))
            }
            TypeExpr::Func(func) => Self::format_func(func),
            TypeExpr::Map { key, value } => Ok(format!(
                "map [{}]{}",
                Self::format(key)?,
                Self::format(value)?
            )),
            TypeExpr::Chan { dir, value } => {
                let value = Self::format(value)?;
                Ok(match dir {
                    ChanDir::Send => format!("chan<- {value}"),
                    ChanDir::Recv => format!("<-chan {value}"),
                    ChanDir::Both => format!("chan {value}"),
                })
            }
            TypeExpr::Paren(_) | TypeExpr::Index { .. } | TypeExpr::BasicLit(_) | TypeExpr::Bad(_) => {
                tracing::debug!(kind = ty.kind_name(), "cannot format type expression");
                Err(DocError::unsupported(ty))
            }
        }
    }

    /// Render a single struct or interface member as `name type`
    ///
    /// Only the first name of a group is used. Embedded members have no name
    /// and cannot be rendered this way.
    pub fn format_field(field: &Field) -> DocResult<String> {
        let name = field
            .names
            .first()
            .ok_or_else(|| DocError::unsupported(field))?;
        Ok(format!("{} {}", name.name, Self::format(&field.ty)?))
    }

    // Results follow the closing parenthesis directly and are never
    // parenthesized, so `func() (int, error)` renders as `func()int,error`.
    // Consumers match on these strings; keep the shape.
    fn format_func(func: &FuncType) -> DocResult<String> {
        let params = Self::join_types(&func.params)?;
        let results = match &func.results {
            Some(results) => Self::join_types(results)?,
            None => String::new(),
        };
        Ok(format!("func({params}){results}"))
    }

    fn join_types(fields: &[Field]) -> DocResult<String> {
        let types = fields
            .iter()
            .map(|field| Self::format(&field.ty))
            .collect::<DocResult<Vec<_>>>()?;
        Ok(types.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FuncType, Ident};

    fn ident(name: &str) -> TypeExpr {
        TypeExpr::ident(name)
    }

    fn fmt(ty: &TypeExpr) -> String {
        TypeFormatter::format(ty).unwrap()
    }

    #[test]
    fn test_format_ident() {
        assert_eq!(fmt(&ident("string")), "string");
    }

    #[test]
    fn test_format_slice_of_pointers() {
        let ty = TypeExpr::slice(TypeExpr::pointer(ident("T")));
        assert_eq!(fmt(&ty), "[]*T");
    }

    #[test]
    fn test_format_array_drops_length() {
        let ty = TypeExpr::Array {
            len: Some(Box::new(TypeExpr::BasicLit("4".to_string()))),
            elem: Box::new(ident("byte")),
        };
        assert_eq!(fmt(&ty), "[]byte");
    }

    #[test]
    fn test_format_ellipsis() {
        assert_eq!(fmt(&TypeExpr::ellipsis(ident("interface{}"))), "...interface{}");
    }

    #[test]
    fn test_format_map_keeps_space() {
        let ty = TypeExpr::map(ident("K"), ident("V"));
        assert_eq!(fmt(&ty), "map [K]V");
    }

    #[test]
    fn test_format_nested_map() {
        let ty = TypeExpr::map(
            ident("string"),
            TypeExpr::map(ident("int"), TypeExpr::slice(ident("error"))),
        );
        assert_eq!(fmt(&ty), "map [string]map [int][]error");
    }

    #[test]
    fn test_format_channels() {
        assert_eq!(fmt(&TypeExpr::chan(ChanDir::Send, ident("T"))), "chan<- T");
        assert_eq!(fmt(&TypeExpr::chan(ChanDir::Recv, ident("T"))), "<-chan T");
        assert_eq!(fmt(&TypeExpr::chan(ChanDir::Both, ident("T"))), "chan T");
    }

    #[test]
    fn test_format_selector() {
        assert_eq!(fmt(&TypeExpr::selector("io", "Reader")), "io.Reader");
        let ty = TypeExpr::pointer(TypeExpr::selector("http", "Request"));
        assert_eq!(fmt(&ty), "*http.Request");
    }

    #[test]
    fn test_format_struct_omits_names() {
        let ty = TypeExpr::Struct(vec![Field::new(["a"], ident("int"))]);
        assert_eq!(fmt(&ty), "struct{int}");

        let ty = TypeExpr::Struct(vec![
            Field::new(["a"], ident("int")),
            Field::new(["b"], TypeExpr::pointer(ident("string"))),
        ]);
        assert_eq!(fmt(&ty), "struct{int,*string}");
    }

    #[test]
    fn test_format_empty_struct_and_interface() {
        assert_eq!(fmt(&TypeExpr::Struct(Vec::new())), "struct{}");
        assert_eq!(fmt(&TypeExpr::Interface(Vec::new())), "interface{}");
    }

    #[test]
    fn test_format_interface_methods() {
        let read = FuncType::new(
            vec![Field::new(["p"], TypeExpr::slice(ident("byte")))],
            Some(vec![
                Field::new(["n"], ident("int")),
                Field::new(["err"], ident("error")),
            ]),
        );
        let ty = TypeExpr::Interface(vec![
            Field::new(["Read"], TypeExpr::Func(read)),
            Field::unnamed(TypeExpr::selector("fmt", "Stringer")),
        ]);
        assert_eq!(fmt(&ty), "interface{func([]byte)int,error,fmt.Stringer}");
    }

    #[test]
    fn test_format_func_without_results() {
        let ty = TypeExpr::Func(FuncType::new(vec![Field::unnamed(ident("string"))], None));
        assert_eq!(fmt(&ty), "func(string)");
    }

    #[test]
    fn test_format_func_results_are_not_parenthesized() {
        let ty = TypeExpr::Func(FuncType::new(
            Vec::new(),
            Some(vec![Field::unnamed(ident("int")), Field::unnamed(ident("error"))]),
        ));
        assert_eq!(fmt(&ty), "func()int,error");
    }

    #[test]
    fn test_format_func_taking_func() {
        let callback = TypeExpr::Func(FuncType::new(
            vec![Field::unnamed(ident("int"))],
            Some(vec![Field::unnamed(ident("bool"))]),
        ));
        let ty = TypeExpr::Func(FuncType::new(
            vec![
                Field::new(["f"], callback),
                Field::new(["rest"], TypeExpr::ellipsis(ident("int"))),
            ],
            None,
        ));
        assert_eq!(fmt(&ty), "func(func(int)bool,...int)");
    }

    #[test]
    fn test_format_field_standalone() {
        let field = Field::new(["count"], ident("int"));
        assert_eq!(TypeFormatter::format_field(&field).unwrap(), "count int");

        let group = Field::new(["x", "y"], ident("float64"));
        assert_eq!(TypeFormatter::format_field(&group).unwrap(), "x float64");
    }

    #[test]
    fn test_format_field_without_name_fails() {
        let field = Field::unnamed(ident("Embedded"));
        let err = TypeFormatter::format_field(&field).unwrap_err();
        assert!(matches!(err, DocError::UnsupportedType { .. }));
    }

    #[test]
    fn test_unsupported_shapes_fail() {
        let cases = [
            TypeExpr::Paren(Box::new(ident("T"))),
            TypeExpr::Index {
                base: Box::new(ident("List")),
                indices: vec![ident("T")],
            },
            TypeExpr::BasicLit("4".to_string()),
            TypeExpr::Bad("???".to_string()),
        ];

        for ty in &cases {
            match TypeFormatter::format(ty) {
                Err(DocError::UnsupportedType { raw }) => assert_eq!(raw, format!("{ty:?}")),
                other => panic!("expected unsupported type for {ty:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unsupported_shape_inside_supported_one_fails() {
        let ty = TypeExpr::slice(TypeExpr::Paren(Box::new(ident("T"))));
        assert!(TypeFormatter::format(&ty).is_err());
    }

    #[test]
    fn test_format_is_deterministic() {
        let build = || {
            TypeExpr::map(
                TypeExpr::Selector {
                    qualifier: Box::new(TypeExpr::Ident(Ident::unpositioned("pkg"))),
                    member: Ident::unpositioned("Key"),
                },
                TypeExpr::chan(ChanDir::Recv, TypeExpr::slice(ident("T"))),
            )
        };
        assert_eq!(fmt(&build()), fmt(&build()));
        assert_eq!(fmt(&build()), "map [pkg.Key]<-chan []T");
    }
}
