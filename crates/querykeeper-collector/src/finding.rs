use serde::Serialize;

/// A single detected access of a lazily-loaded collection outside its owning
/// persistence context. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Simple name of the collection's element entity (e.g. "Role")
    pub entity_name: String,

    /// Name of the accessed field on the owning entity
    pub field_name: String,

    /// Simple name of the owning entity
    pub root_entity: String,

    /// Dotted access path, `<root_entity>.<field_name>`
    pub full_path: String,
}

impl Finding {
    /// Builds a detached-access finding; the full path is derived from the
    /// root entity and the field name.
    pub fn detached_access(entity_name: &str, field_name: &str, root_entity: &str) -> Self {
        Self {
            entity_name: entity_name.to_string(),
            field_name: field_name.to_string(),
            root_entity: root_entity.to_string(),
            full_path: format!("{}.{}", root_entity, field_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_access_derives_the_full_path() {
        let finding = Finding::detached_access("Role", "roles", "User");

        assert_eq!(finding.entity_name, "Role");
        assert_eq!(finding.field_name, "roles");
        assert_eq!(finding.root_entity, "User");
        assert_eq!(finding.full_path, "User.roles");
    }
}
