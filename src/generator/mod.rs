mod naming;
mod render;
mod resolve;

pub use naming::{to_snake_case, to_upper_camel_case};
pub use resolve::{resolve_nullable, UnsupportedTypeShape};

use std::collections::HashMap;

use check_keyword::CheckKeyword;
use clap::ValueEnum;
use thiserror::Error;
use tracing::{debug, warn};

use crate::schema::{EnumValueDefinition, FieldDefinition, NamedType, TypeGraph, TypeKind};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("field `{owner}.{field}` has an {source}")]
    UnsupportedTypeShape {
        owner: String,
        field: String,
        source: UnsupportedTypeShape,
    },
    #[error("type `{name}` is {kind}, which cannot be generated")]
    UnsupportedDeclarationKind { name: String, kind: UnsupportedKind },
    #[error("field `{owner}.{field}` resolved to `{expression}`, which is not a valid Rust type")]
    InvalidTypeExpression {
        owner: String,
        field: String,
        expression: String,
        source: syn::Error,
    },
    #[error("`{first}` and `{second}` in {owner} both become `{ident}`")]
    DuplicateIdentifier {
        owner: String,
        ident: String,
        first: String,
        second: String,
    },
}

/// What to do with schema types that have no Rust counterpart.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum UnsupportedKindAction {
    #[default]
    Deny,
    Warn,
}

#[derive(Clone, Debug, Default)]
pub struct GeneratorOptions {
    pub unsupported_kinds: UnsupportedKindAction,
    pub prelude: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnsupportedKind {
    Interface,
    Union,
    InputObject,
}

impl std::fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Interface => "an interface",
            Self::Union => "a union",
            Self::InputObject => "an input object",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeclarationKind {
    Scalar,
    Object,
    Enum,
    Unsupported(UnsupportedKind),
}

impl DeclarationKind {
    pub fn of(kind: &TypeKind) -> Self {
        match kind {
            TypeKind::Scalar => Self::Scalar,
            TypeKind::Object(_) => Self::Object,
            TypeKind::Enum(_) => Self::Enum,
            TypeKind::Interface => Self::Unsupported(UnsupportedKind::Interface),
            TypeKind::Union => Self::Unsupported(UnsupportedKind::Union),
            TypeKind::InputObject => Self::Unsupported(UnsupportedKind::InputObject),
        }
    }
}

/// Makes a converted name usable as a Rust identifier.
fn rust_identifier(name: &str) -> String {
    if ["crate", "self", "super", "Self", "_"].contains(&name) {
        // These are not allowed as raw identifiers
        format!("{name}_")
    } else if name.is_keyword() {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Fails on the first identifier produced by two different schema names.
fn ensure_unique<'n>(
    owner: &str,
    names: impl IntoIterator<Item = (&'n str, &'n str)>,
) -> Result<(), GenerateError> {
    let mut seen = HashMap::new();
    for (source, ident) in names {
        if let Some(first) = seen.insert(ident, source) {
            return Err(GenerateError::DuplicateIdentifier {
                owner: owner.to_string(),
                ident: ident.to_string(),
                first: first.to_string(),
                second: source.to_string(),
            });
        }
    }
    Ok(())
}

/// A struct field: Rust identifier, Rust type expression and doc comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub ident: String,
    pub ty: String,
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantDecl {
    pub ident: String,
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    Scalar {
        name: String,
        comment: Option<String>,
    },
    Object {
        name: String,
        comment: Option<String>,
        fields: Vec<FieldDecl>,
    },
    Enum {
        name: String,
        comment: Option<String>,
        variants: Vec<VariantDecl>,
    },
    /// Resolver stub for one field of the query root.
    Query {
        name: String,
        constructor: String,
        result_type: String,
        comment: Option<String>,
    },
}

pub struct Generator<'a> {
    graph: &'a TypeGraph,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    pub fn new(graph: &'a TypeGraph, options: GeneratorOptions) -> Self {
        Self { graph, options }
    }

    /// Classifies every type of the graph, then every query root field.
    ///
    /// The query root type itself is not declared: its fields become query
    /// stubs instead.
    pub fn declarations(&self) -> Result<Vec<Declaration>, GenerateError> {
        let mut declarations = Vec::new();
        let mut declared = Vec::new();
        let query_type = self.graph.query_type_name();

        for named_type in self.graph.types() {
            if named_type.name == query_type {
                continue;
            }
            if let Some(declaration) = self.visit_type(named_type)? {
                declared.push((named_type.name.as_str(), rust_identifier(&named_type.name)));
                declarations.push(declaration);
            }
        }
        ensure_unique(
            "the schema types",
            declared.iter().map(|(name, ident)| (*name, ident.as_str())),
        )?;

        if let Some(query_root) = self.graph.query_root() {
            for field in query_root.fields() {
                declarations.push(Self::visit_query_field(&query_root.name, field)?);
            }
        } else {
            debug!(%query_type, "schema has no query root, no query stubs generated");
        }

        Ok(declarations)
    }

    pub fn generate(&self) -> Result<String, GenerateError> {
        let declarations = self.declarations()?;
        render::render(&declarations, self.options.prelude)
    }

    fn visit_type(&self, named_type: &NamedType) -> Result<Option<Declaration>, GenerateError> {
        let name = rust_identifier(&named_type.name);
        let comment = named_type.description.clone();
        let owner = format!("type `{}`", named_type.name);

        let kind = DeclarationKind::of(&named_type.kind);
        let declaration = match kind {
            DeclarationKind::Scalar => Declaration::Scalar { name, comment },
            DeclarationKind::Object => {
                let fields = named_type
                    .fields()
                    .iter()
                    .map(|field| Self::visit_field(&named_type.name, field))
                    .collect::<Result<Vec<_>, _>>()?;
                ensure_unique(
                    &owner,
                    named_type
                        .fields()
                        .iter()
                        .map(|f| f.name.as_str())
                        .zip(fields.iter().map(|f| f.ident.as_str())),
                )?;
                Declaration::Object {
                    name,
                    comment,
                    fields,
                }
            }
            DeclarationKind::Enum => {
                let variants: Vec<_> = named_type
                    .values()
                    .iter()
                    .map(Self::visit_enum_value)
                    .collect();
                ensure_unique(
                    &owner,
                    named_type
                        .values()
                        .iter()
                        .map(|v| v.name.as_str())
                        .zip(variants.iter().map(|v| v.ident.as_str())),
                )?;
                Declaration::Enum {
                    name,
                    comment,
                    variants,
                }
            }
            DeclarationKind::Unsupported(kind) => {
                let name = named_type.name.clone();
                return match self.options.unsupported_kinds {
                    UnsupportedKindAction::Deny => {
                        Err(GenerateError::UnsupportedDeclarationKind { name, kind })
                    }
                    UnsupportedKindAction::Warn => {
                        warn!(name = %name, %kind, "skipping type that cannot be generated");
                        Ok(None)
                    }
                };
            }
        };
        debug!(name = %named_type.name, ?kind, "classified type");
        Ok(Some(declaration))
    }

    fn visit_field(owner: &str, field: &FieldDefinition) -> Result<FieldDecl, GenerateError> {
        let ty = resolve_nullable(&field.ty.map_names(&rust_identifier)).map_err(|source| {
            GenerateError::UnsupportedTypeShape {
                owner: owner.to_string(),
                field: field.name.clone(),
                source,
            }
        })?;
        Ok(FieldDecl {
            ident: rust_identifier(&to_snake_case(&field.name)),
            ty,
            comment: field.description.clone(),
        })
    }

    fn visit_enum_value(value: &EnumValueDefinition) -> VariantDecl {
        VariantDecl {
            ident: rust_identifier(&to_upper_camel_case(&value.name)),
            comment: value.description.clone(),
        }
    }

    fn visit_query_field(
        owner: &str,
        field: &FieldDefinition,
    ) -> Result<Declaration, GenerateError> {
        let FieldDecl { ident, ty, comment } = Self::visit_field(owner, field)?;
        Ok(Declaration::Query {
            name: field.name.clone(),
            constructor: ident,
            result_type: ty,
            comment,
        })
    }
}
