//! Entity schema registry.
//!
//! The persistence runtime reports detached accesses using qualified dotted
//! names (`com.example.demo.User.roles`). Instead of reflecting over loaded
//! types at detection time, the mapped entities are declared once at startup
//! and every lookup becomes a total function over this registry.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Returns the trailing identifier of a qualified dotted name, or the whole
/// name when it carries no qualifier. This is a naming heuristic and can be
/// wrong for generated proxy subclasses.
pub fn simple_name(qualified: &str) -> &str {
    match qualified.rsplit_once('.') {
        Some((_, name)) => name,
        None => qualified,
    }
}

/// Declared kind of a mapped entity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Plain column value
    Attribute,

    /// To-one association towards the qualified target entity
    Association { target: String },

    /// To-many association holding elements of the qualified entity.
    /// Only this kind carries a resolvable element type.
    Collection { element: String },
}

/// A mapped entity: its qualified name and declared fields, in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    name: String,
    fields: IndexMap<String, FieldKind>,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn attribute(mut self, name: &str) -> Self {
        self.fields.insert(name.to_string(), FieldKind::Attribute);
        self
    }

    pub fn association(mut self, name: &str, target: &str) -> Self {
        self.fields.insert(name.to_string(), FieldKind::Association { target: target.to_string() });
        self
    }

    pub fn collection(mut self, name: &str, element: &str) -> Self {
        self.fields.insert(name.to_string(), FieldKind::Collection { element: element.to_string() });
        self
    }

    /// Qualified dotted name of the entity.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Looks up a field declared on this exact entity. There is no lookup
    /// across an inheritance hierarchy.
    pub fn field(&self, name: &str) -> Result<&FieldKind, Error> {
        self.fields
            .get(name)
            .ok_or_else(|| Error::UnknownField(self.name.clone(), name.to_string()))
    }
}

/// Schema declaration, usually deserialized from the host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfiguration {
    pub entities: Vec<EntityDescriptor>,
}

/// Registry of mapped entities keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: HashMap<String, EntityDescriptor>,
}

impl EntityRegistry {
    pub fn new(configuration: &SchemaConfiguration) -> Self {
        let mut builder = Self::builder();
        for entity in &configuration.entities {
            builder = builder.entity(entity.clone());
        }

        builder.build()
    }

    pub fn builder() -> EntityRegistryBuilder {
        EntityRegistryBuilder::default()
    }

    pub fn entity(&self, name: &str) -> Result<&EntityDescriptor, Error> {
        self.entities.get(name).ok_or_else(|| Error::UnknownEntity(name.to_string()))
    }

    /// Resolves the qualified element type of a collection field.
    ///
    /// Fails when the declaring entity is unknown, the field is not declared
    /// on it, or the field is not a collection.
    pub fn resolve_element_type(&self, declaring: &str, field: &str) -> Result<&str, Error> {
        match self.entity(declaring)?.field(field)? {
            FieldKind::Collection { element } => Ok(element),
            _ => Err(Error::NotACollection(declaring.to_string(), field.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct EntityRegistryBuilder {
    entities: HashMap<String, EntityDescriptor>,
}

impl EntityRegistryBuilder {
    pub fn entity(mut self, descriptor: EntityDescriptor) -> Self {
        self.entities.insert(descriptor.name().to_string(), descriptor);
        self
    }

    pub fn build(self) -> EntityRegistry {
        EntityRegistry { entities: self.entities }
    }
}
