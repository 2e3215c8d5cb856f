//! Mapping of schema type references to Rust type expressions.
//!
//! GraphQL expresses nullability per wrapping layer. The generated code only
//! keeps it at the outermost layer of a field: elements of a list are always
//! resolved to their bare type.

use thiserror::Error;

use crate::schema::TypeReference;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unsupported type shape `{0}`")]
pub struct UnsupportedTypeShape(pub String);

/// Resolves the type of a field or query result.
///
/// A bare reference is nullable and becomes `Option<..>`; a non-null wrapper
/// removes the `Option`.
pub fn resolve_nullable(ty: &TypeReference) -> Result<String, UnsupportedTypeShape> {
    match ty {
        TypeReference::Named(name) => Ok(format!("Option<{name}>")),
        TypeReference::List(inner) => Ok(format!("Option<Vec<{}>>", resolve_element(inner))),
        TypeReference::NonNull(inner) => match inner.as_ref() {
            TypeReference::Named(name) => Ok(name.clone()),
            TypeReference::List(element) => Ok(format!("Vec<{}>", resolve_element(element))),
            TypeReference::NonNull(_) => Err(UnsupportedTypeShape(ty.to_string())),
        },
    }
}

/// Resolves the element type of a list, dropping any nullability.
pub fn resolve_element(ty: &TypeReference) -> String {
    match ty {
        TypeReference::Named(name) => name.clone(),
        TypeReference::List(inner) => format!("Vec<{}>", resolve_element(inner)),
        TypeReference::NonNull(inner) => resolve_element(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TypeReference {
        TypeReference::named(name)
    }

    fn list(inner: TypeReference) -> TypeReference {
        TypeReference::list(inner)
    }

    fn non_null(inner: TypeReference) -> TypeReference {
        TypeReference::non_null(inner)
    }

    #[test]
    fn named_is_optional() {
        assert_eq!(resolve_nullable(&named("Foo")).unwrap(), "Option<Foo>");
    }

    #[test]
    fn non_null_named_is_bare() {
        assert_eq!(resolve_nullable(&non_null(named("Foo"))).unwrap(), "Foo");
    }

    #[test]
    fn list_is_optional_vec() {
        assert_eq!(
            resolve_nullable(&list(named("Bar"))).unwrap(),
            "Option<Vec<Bar>>"
        );
        assert_eq!(
            resolve_nullable(&list(non_null(named("Bar")))).unwrap(),
            "Option<Vec<Bar>>"
        );
    }

    #[test]
    fn non_null_list_is_vec_of_bare_elements() {
        assert_eq!(
            resolve_nullable(&non_null(list(non_null(named("Int"))))).unwrap(),
            "Vec<Int>"
        );
        assert_eq!(
            resolve_nullable(&non_null(list(named("Int")))).unwrap(),
            "Vec<Int>"
        );
    }

    #[test]
    fn nested_lists_do_not_add_options() {
        assert_eq!(
            resolve_nullable(&list(list(non_null(named("A"))))).unwrap(),
            "Option<Vec<Vec<A>>>"
        );
        assert_eq!(
            resolve_nullable(&non_null(list(non_null(list(named("A")))))).unwrap(),
            "Vec<Vec<A>>"
        );
    }

    #[test]
    fn element_resolution_strips_non_null() {
        assert_eq!(resolve_element(&named("A")), "A");
        assert_eq!(resolve_element(&non_null(named("A"))), "A");
        assert_eq!(resolve_element(&non_null(list(named("A")))), "Vec<A>");
    }

    #[test]
    fn doubled_non_null_is_rejected() {
        let err = resolve_nullable(&non_null(non_null(named("X")))).unwrap_err();
        assert_eq!(err, UnsupportedTypeShape("X!!".into()));
    }
}
