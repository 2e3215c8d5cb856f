//! Queryable type graph over one or more GraphQL schema documents.

mod type_ref;

pub use type_ref::TypeReference;

use async_graphql_parser::{
    types::{self as ast, TypeSystemDefinition},
    Positioned,
};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_QUERY_TYPE: &str = "Query";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse schema source #{index}: {source}")]
    Parse {
        index: usize,
        #[source]
        source: async_graphql_parser::Error,
    },
    #[error("type {name:?} is defined more than once")]
    DuplicateType { name: String },
    #[error("cannot extend {name:?}: no such type is defined")]
    UnknownExtensionTarget { name: String },
    #[error("cannot extend {name:?}: it is {actual}, the extension is {extension}")]
    ExtensionKindMismatch {
        name: String,
        actual: &'static str,
        extension: &'static str,
    },
    #[error("query root type {name:?} is not defined")]
    UnknownQueryType { name: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeReference,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValueDefinition {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Object(Vec<FieldDefinition>),
    Enum(Vec<EnumValueDefinition>),
    Interface,
    Union,
    InputObject,
}

impl TypeKind {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Scalar => "a scalar",
            Self::Object(_) => "an object type",
            Self::Enum(_) => "an enum",
            Self::Interface => "an interface",
            Self::Union => "a union",
            Self::InputObject => "an input object",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedType {
    pub name: String,
    pub description: Option<String>,
    pub kind: TypeKind,
}

impl NamedType {
    pub fn fields(&self) -> &[FieldDefinition] {
        match &self.kind {
            TypeKind::Object(fields) => fields,
            _ => &[],
        }
    }

    pub fn values(&self) -> &[EnumValueDefinition] {
        match &self.kind {
            TypeKind::Enum(values) => values,
            _ => &[],
        }
    }
}

/// All named types of a schema, in declaration order.
#[derive(Debug, Default)]
pub struct TypeGraph {
    types: IndexMap<String, NamedType>,
    query_type: Option<String>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and merges schema sources into a single graph.
    ///
    /// Type extensions are applied after every source has been read, so an
    /// extension may come before the definition it extends.
    pub fn parse<S: AsRef<str>>(sources: &[S]) -> Result<Self, SchemaError> {
        let mut graph = Self::new();
        let mut extensions = Vec::new();

        for (index, source) in sources.iter().enumerate() {
            let document = async_graphql_parser::parse_schema(source.as_ref())
                .map_err(|source| SchemaError::Parse { index, source })?;

            for definition in document.definitions {
                match definition {
                    TypeSystemDefinition::Schema(schema) => {
                        if let Some(query) = schema.node.query {
                            graph.query_type = Some(query.node.to_string());
                        }
                    }
                    TypeSystemDefinition::Type(definition) => {
                        if definition.node.extend {
                            extensions.push(definition.node);
                        } else {
                            graph.insert(map_type_definition(definition.node))?;
                        }
                    }
                    TypeSystemDefinition::Directive(_) => {}
                }
            }
        }

        for extension in extensions {
            graph.extend(map_type_definition(extension))?;
        }
        if let Some(query_type) = graph.query_type.take() {
            graph.set_query_type(query_type)?;
        }

        debug!(types = graph.types.len(), "built type graph");
        Ok(graph)
    }

    pub fn insert(&mut self, named_type: NamedType) -> Result<(), SchemaError> {
        if self.types.contains_key(&named_type.name) {
            return Err(SchemaError::DuplicateType {
                name: named_type.name,
            });
        }
        self.types.insert(named_type.name.clone(), named_type);
        Ok(())
    }

    fn extend(&mut self, extension: NamedType) -> Result<(), SchemaError> {
        let Some(base) = self.types.get_mut(&extension.name) else {
            return Err(SchemaError::UnknownExtensionTarget {
                name: extension.name,
            });
        };
        debug!(name = %extension.name, "applying type extension");

        match (&mut base.kind, extension.kind) {
            (TypeKind::Object(fields), TypeKind::Object(more)) => fields.extend(more),
            (TypeKind::Enum(values), TypeKind::Enum(more)) => values.extend(more),
            (TypeKind::Scalar, TypeKind::Scalar)
            | (TypeKind::Interface, TypeKind::Interface)
            | (TypeKind::Union, TypeKind::Union)
            | (TypeKind::InputObject, TypeKind::InputObject) => {}
            (actual, extension_kind) => {
                return Err(SchemaError::ExtensionKindMismatch {
                    name: extension.name,
                    actual: actual.describe(),
                    extension: extension_kind.describe(),
                })
            }
        }
        Ok(())
    }

    /// Names the query root explicitly. Unlike the implicit `Query`
    /// default, an explicit root has to exist.
    pub fn set_query_type(&mut self, name: impl Into<String>) -> Result<(), SchemaError> {
        let name = name.into();
        if !self.types.contains_key(&name) {
            return Err(SchemaError::UnknownQueryType { name });
        }
        self.query_type = Some(name);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values()
    }

    pub fn query_type_name(&self) -> &str {
        self.query_type.as_deref().unwrap_or(DEFAULT_QUERY_TYPE)
    }

    pub fn query_root(&self) -> Option<&NamedType> {
        self.get(self.query_type_name())
    }
}

fn description(description: Option<Positioned<String>>) -> Option<String> {
    description.map(|d| d.node)
}

fn map_type_definition(definition: ast::TypeDefinition) -> NamedType {
    let kind = match definition.kind {
        ast::TypeKind::Scalar => TypeKind::Scalar,
        ast::TypeKind::Object(object) => TypeKind::Object(
            object
                .fields
                .into_iter()
                .map(|field| {
                    let field = field.node;
                    FieldDefinition {
                        name: field.name.node.to_string(),
                        description: description(field.description),
                        ty: TypeReference::from(&field.ty.node),
                    }
                })
                .collect(),
        ),
        ast::TypeKind::Enum(enum_type) => TypeKind::Enum(
            enum_type
                .values
                .into_iter()
                .map(|value| {
                    let value = value.node;
                    EnumValueDefinition {
                        name: value.value.node.to_string(),
                        description: description(value.description),
                    }
                })
                .collect(),
        ),
        ast::TypeKind::Interface(_) => TypeKind::Interface,
        ast::TypeKind::Union(_) => TypeKind::Union,
        ast::TypeKind::InputObject(_) => TypeKind::InputObject,
    };

    NamedType {
        name: definition.name.node.to_string(),
        description: description(definition.description),
        kind,
    }
}
