use std::fmt;

use async_graphql_parser::types::{BaseType, Type};

/// A reference to a schema type as written at a field declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeReference {
    Named(String),
    List(Box<TypeReference>),
    NonNull(Box<TypeReference>),
}

impl TypeReference {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn list(inner: TypeReference) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeReference) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Rewrites every named type, keeping the wrapping intact.
    pub fn map_names(&self, f: &impl Fn(&str) -> String) -> Self {
        match self {
            Self::Named(name) => Self::Named(f(name)),
            Self::List(inner) => Self::list(inner.map_names(f)),
            Self::NonNull(inner) => Self::non_null(inner.map_names(f)),
        }
    }
}

impl From<&Type> for TypeReference {
    fn from(ty: &Type) -> Self {
        let base = match &ty.base {
            BaseType::Named(name) => Self::named(name.as_str()),
            BaseType::List(inner) => Self::list(Self::from(inner.as_ref())),
        };
        if ty.nullable {
            base
        } else {
            Self::non_null(base)
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(ty: &str) -> TypeReference {
        let ty = Type::new(ty).expect("valid type");
        TypeReference::from(&ty)
    }

    #[test]
    fn converts_parser_types() {
        assert_eq!(parse("String"), TypeReference::named("String"));
        assert_eq!(
            parse("[Int!]!"),
            TypeReference::non_null(TypeReference::list(TypeReference::non_null(
                TypeReference::named("Int")
            )))
        );
        assert_eq!(
            parse("[[Foo]]"),
            TypeReference::list(TypeReference::list(TypeReference::named("Foo")))
        );
    }

    #[test]
    fn displays_graphql_notation() {
        assert_eq!(parse("[Int!]!").to_string(), "[Int!]!");
        let doubled =
            TypeReference::non_null(TypeReference::non_null(TypeReference::named("X")));
        assert_eq!(doubled.to_string(), "X!!");
    }

    #[test]
    fn map_names_keeps_wrapping() {
        let mapped = parse("[Foo!]").map_names(&|name| format!("{name}_"));
        assert_eq!(mapped.to_string(), "[Foo_!]");
    }
}
