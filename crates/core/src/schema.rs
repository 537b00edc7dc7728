//! Schema declarations for process ports and registered record types.
//!
//! Type tags render to the compact strings a host understands, for example
//! `map[particle]` or `tuple[float,float,float]`.

use std::{collections::BTreeMap, fmt};

use thiserror::Error;

/// A type expression used in port and record declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    String,
    Float,
    Integer,
    Boolean,
    Tuple(Vec<TypeTag>),
    List(Box<TypeTag>),
    Map(Box<TypeTag>),
    /// A record type registered by name in a [`TypeRegistry`].
    Named(&'static str),
}

impl TypeTag {
    /// Shorthand for `map[name]`.
    #[must_use]
    pub fn map_of(name: &'static str) -> Self {
        Self::Map(Box::new(Self::Named(name)))
    }

    /// Shorthand for `list[tag]`.
    #[must_use]
    pub fn list_of(tag: TypeTag) -> Self {
        Self::List(Box::new(tag))
    }

    /// Visits every named type referenced by this tag.
    fn named(&self, out: &mut Vec<&'static str>) {
        match self {
            Self::Named(name) => out.push(*name),
            Self::Tuple(items) => items.iter().for_each(|item| item.named(out)),
            Self::List(inner) | Self::Map(inner) => inner.named(out),
            Self::String | Self::Float | Self::Integer | Self::Boolean => {}
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Float => f.write_str("float"),
            Self::Integer => f.write_str("integer"),
            Self::Boolean => f.write_str("boolean"),
            Self::Tuple(items) => {
                f.write_str("tuple[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::List(inner) => write!(f, "list[{inner}]"),
            Self::Map(inner) => write!(f, "map[{inner}]"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// How a host applies an update to a value of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Apply {
    /// The update overwrites the previous value.
    Set,
    /// The update is merged field by field into the previous value.
    Merge,
}

impl fmt::Display for Apply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => f.write_str("set"),
            Self::Merge => f.write_str("merge"),
        }
    }
}

/// A named record type with ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    pub name: &'static str,
    pub fields: Vec<(&'static str, TypeTag)>,
    pub apply: Apply,
}

impl TypeSchema {
    /// Returns the tag of a field, if declared.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&TypeTag> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, tag)| tag)
    }
}

/// The `particle` record: type, position, and bonded neighbors.
#[must_use]
pub fn particle_schema() -> TypeSchema {
    TypeSchema {
        name: "particle",
        fields: vec![
            ("type_name", TypeTag::String),
            (
                "position",
                TypeTag::Tuple(vec![TypeTag::Float, TypeTag::Float, TypeTag::Float]),
            ),
            ("neighbor_ids", TypeTag::list_of(TypeTag::Integer)),
        ],
        apply: Apply::Set,
    }
}

/// The `topology` record: type and member particles.
#[must_use]
pub fn topology_schema() -> TypeSchema {
    TypeSchema {
        name: "topology",
        fields: vec![
            ("type_name", TypeTag::String),
            ("particle_ids", TypeTag::list_of(TypeTag::Integer)),
        ],
        apply: Apply::Set,
    }
}

/// Port name to type tag, in port-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ports(BTreeMap<&'static str, TypeTag>);

impl Ports {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a port, replacing any earlier declaration with the same name.
    #[must_use]
    pub fn with(mut self, name: &'static str, tag: TypeTag) -> Self {
        self.0.insert(name, tag);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeTag> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &TypeTag)> {
        self.0.iter().map(|(name, tag)| (*name, tag))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Errors raised by schema registration and port checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("type `{name}` is already registered")]
    AlreadyRegistered { name: &'static str },

    #[error("port `{port}` references unregistered type `{name}`")]
    UnknownType {
        port: &'static str,
        name: &'static str,
    },
}

/// Registered record types, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<&'static str, TypeSchema>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the `particle` and `topology` types.
    #[must_use]
    pub fn with_monomer_types() -> Self {
        let mut registry = Self::new();
        registry.types.insert("particle", particle_schema());
        registry.types.insert("topology", topology_schema());
        registry
    }

    /// Registers a record type.
    ///
    /// # Errors
    ///
    /// Returns an error if a type with the same name is already registered.
    pub fn register(&mut self, schema: TypeSchema) -> Result<(), SchemaError> {
        if self.types.contains_key(schema.name) {
            return Err(SchemaError::AlreadyRegistered { name: schema.name });
        }
        self.types.insert(schema.name, schema);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeSchema> {
        self.types.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Checks that every named type referenced by `ports` is registered.
    ///
    /// # Errors
    ///
    /// Returns the first port that references an unknown type.
    pub fn check_ports(&self, ports: &Ports) -> Result<(), SchemaError> {
        for (port, tag) in ports.iter() {
            let mut names = Vec::new();
            tag.named(&mut names);
            if let Some(name) = names.into_iter().find(|name| !self.contains(name)) {
                return Err(SchemaError::UnknownType { port, name });
            }
        }
        Ok(())
    }
}
