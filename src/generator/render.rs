use quote::format_ident;
use syn::{parse_quote, Attribute, Field, FieldMutability, Ident, Item, Type, Variant, Visibility};

use super::{Declaration, FieldDecl, GenerateError, VariantDecl};

/// Identifiers arrive already escaped; an `r#` prefix becomes a raw ident.
fn name_to_ident(name: &str) -> Ident {
    format_ident!("{}", name)
}

/// One `///` line per description line. Empty descriptions produce nothing.
fn doc_attrs(comment: Option<&str>) -> Vec<Attribute> {
    let Some(comment) = comment.filter(|c| !c.trim().is_empty()) else {
        return Vec::new();
    };
    comment
        .lines()
        .map(|line| {
            let line = format!(" {}", line.trim_end());
            parse_quote!(#[doc = #line])
        })
        .collect()
}

fn parse_type(owner: &str, field: &str, expression: &str) -> Result<Type, GenerateError> {
    syn::parse_str(expression).map_err(|source| GenerateError::InvalidTypeExpression {
        owner: owner.to_string(),
        field: field.to_string(),
        expression: expression.to_string(),
        source,
    })
}

fn render_scalar(name: &str, comment: Option<&str>) -> Item {
    let docs = doc_attrs(comment);
    let name = name_to_ident(name);
    parse_quote! {
        #(#docs)*
        pub struct #name(String);
    }
}

fn render_object(
    name: &str,
    comment: Option<&str>,
    fields: &[FieldDecl],
) -> Result<Item, GenerateError> {
    let docs = doc_attrs(comment);
    let fields = fields
        .iter()
        .map(|field| {
            Ok(Field {
                attrs: doc_attrs(field.comment.as_deref()),
                vis: Visibility::Inherited,
                mutability: FieldMutability::None,
                ident: Some(name_to_ident(&field.ident)),
                colon_token: Some(Default::default()),
                ty: parse_type(name, &field.ident, &field.ty)?,
            })
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;
    let name = name_to_ident(name);

    Ok(parse_quote! {
        #(#docs)*
        #[derive(SimpleObject)]
        pub struct #name {
            #(#fields),*
        }
    })
}

fn render_enum(name: &str, comment: Option<&str>, variants: &[VariantDecl]) -> Item {
    let docs = doc_attrs(comment);
    let variants: Vec<Variant> = variants
        .iter()
        .map(|variant| {
            let docs = doc_attrs(variant.comment.as_deref());
            let ident = name_to_ident(&variant.ident);
            parse_quote! {
                #(#docs)*
                #ident
            }
        })
        .collect();
    let name = name_to_ident(name);

    parse_quote! {
        #(#docs)*
        pub enum #name {
            #(#variants),*
        }
    }
}

fn render_query(
    name: &str,
    constructor: &str,
    result_type: &str,
    comment: Option<&str>,
) -> Result<[Item; 2], GenerateError> {
    let docs = doc_attrs(comment);
    let query = format_ident!("{}Query", name);
    let constructor = name_to_ident(constructor);
    let result_type = parse_type(&query.to_string(), name, result_type)?;

    Ok([
        parse_quote! {
            #[derive(Default)]
            pub struct #query;
        },
        parse_quote! {
            #[Object]
            impl #query {
                #(#docs)*
                pub async fn #constructor(&self, _ctx: &Context<'_>) -> Result<#result_type> {
                    unimplemented!()
                }
            }
        },
    ])
}

pub(super) fn render(
    declarations: &[Declaration],
    prelude: bool,
) -> Result<String, GenerateError> {
    let mut items: Vec<Item> = Vec::new();

    if prelude {
        items.push(parse_quote! {
            use async_graphql::{Context, Object, Result, SimpleObject};
        });
    }

    for declaration in declarations {
        match declaration {
            Declaration::Scalar { name, comment } => {
                items.push(render_scalar(name, comment.as_deref()));
            }
            Declaration::Object {
                name,
                comment,
                fields,
            } => items.push(render_object(name, comment.as_deref(), fields)?),
            Declaration::Enum {
                name,
                comment,
                variants,
            } => items.push(render_enum(name, comment.as_deref(), variants)),
            Declaration::Query {
                name,
                constructor,
                result_type,
                comment,
            } => items.extend(render_query(
                name,
                constructor,
                result_type,
                comment.as_deref(),
            )?),
        }
    }

    let root = syn::File {
        shebang: None,
        attrs: Vec::new(),
        items,
    };
    Ok(prettyplease::unparse(&root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Generator, GeneratorOptions};
    use crate::schema::TypeGraph;

    fn generate(sdl: &str) -> String {
        let graph = TypeGraph::parse(&[sdl]).unwrap();
        Generator::new(&graph, GeneratorOptions::default())
            .generate()
            .unwrap()
    }

    #[test]
    fn renders_object_struct() {
        let output = generate(
            r#"
            "A foo"
            type Foo {
              "The bar"
              bar: String
              baz: [Int!]!
            }
            "#,
        );
        assert!(output.contains("/// A foo\n#[derive(SimpleObject)]\npub struct Foo {"));
        assert!(output.contains("    /// The bar\n    bar: Option<String>,"));
        assert!(output.contains("    baz: Vec<Int>,"));
    }

    #[test]
    fn renders_scalar_and_enum() {
        let output = generate(
            r#"
            "An opaque url"
            scalar Url
            enum Color { RED_ISH GREEN }
            "#,
        );
        assert!(output.contains("/// An opaque url\npub struct Url(String);"));
        assert!(output.contains("pub enum Color {\n    RedIsh,\n    Green,\n}"));
    }

    #[test]
    fn renders_query_stub() {
        let output = generate(
            r#"
            type Query {
              """
              Find a user
              by name
              """
              userByName(name: String!): String
            }
            "#,
        );
        assert!(output.contains("#[derive(Default)]\npub struct userByNameQuery;"));
        assert!(output.contains("#[Object]\nimpl userByNameQuery {"));
        assert!(output.contains("    /// Find a user\n    /// by name\n"));
        assert!(output.contains(
            "pub async fn user_by_name(&self, _ctx: &Context<'_>) -> Result<Option<String>> {"
        ));
        assert!(output.contains("unimplemented!()"));
    }

    #[test]
    fn escapes_keywords() {
        let output = generate("type Foo { type: String self: Int }");
        assert!(output.contains("r#type: Option<String>,"));
        assert!(output.contains("self_: Option<Int>,"));
    }

    #[test]
    fn escapes_referenced_type_names() {
        let output = generate(
            r#"
            type Self { a: Int }
            type type { b: Int }
            type Foo { s: Self t: [type!]! }
            "#,
        );
        assert!(output.contains("pub struct Self_ {"));
        assert!(output.contains("pub struct r#type {"));
        assert!(output.contains("    s: Option<Self_>,"));
        assert!(output.contains("    t: Vec<r#type>,"));
    }

    #[test]
    fn prelude_is_optional() {
        let graph = TypeGraph::parse(&["scalar Url"]).unwrap();
        let options = GeneratorOptions {
            prelude: true,
            ..Default::default()
        };
        let output = Generator::new(&graph, options).generate().unwrap();
        assert!(output.starts_with("use async_graphql::{Context, Object, Result, SimpleObject};"));
        assert!(!generate("scalar Url").contains("use async_graphql"));
    }

    #[test]
    fn rejects_type_expressions_that_are_not_rust() {
        let declarations = [Declaration::Object {
            name: "Foo".into(),
            comment: None,
            fields: vec![FieldDecl {
                ident: "bar".into(),
                ty: "Option<".into(),
                comment: None,
            }],
        }];
        let err = render(&declarations, false).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::InvalidTypeExpression { ref owner, ref field, .. }
                if owner == "Foo" && field == "bar"
        ));
    }

    #[test]
    fn blank_descriptions_emit_no_docs() {
        assert!(doc_attrs(None).is_empty());
        assert!(doc_attrs(Some("  ")).is_empty());
        assert_eq!(doc_attrs(Some("a\nb")).len(), 2);
    }
}
