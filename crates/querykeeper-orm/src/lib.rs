use thiserror::Error;

mod runtime;
mod schema;

pub use runtime::LazyInitializationError;
pub use schema::{simple_name, EntityDescriptor, EntityRegistry, EntityRegistryBuilder, FieldKind, SchemaConfiguration};

#[cfg(feature = "testing")]
pub mod testing;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown entity {0}")]
    UnknownEntity(String),

    #[error("unknown field {0}.{1}")]
    UnknownField(String, String),

    #[error("field {0}.{1} is not a collection")]
    NotACollection(String, String),
}
