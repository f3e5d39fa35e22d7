use crate::{EntityDescriptor, EntityRegistry};

/// Canned demo schema used across the workspace tests: a small blog-style
/// entity graph with lazily-loaded collections.
pub struct TestEnvironment;

impl TestEnvironment {
    pub const COMMENT: &'static str = "com.example.demo.Comment";
    pub const POST: &'static str = "com.example.demo.Post";
    pub const ROLE: &'static str = "com.example.demo.Role";
    pub const USER: &'static str = "com.example.demo.User";

    pub fn schema() -> EntityRegistry {
        EntityRegistry::builder()
            .entity(
                EntityDescriptor::new(Self::USER)
                    .attribute("name")
                    .attribute("email")
                    .collection("roles", Self::ROLE),
            )
            .entity(EntityDescriptor::new(Self::ROLE).attribute("label").association("user", Self::USER))
            .entity(
                EntityDescriptor::new(Self::POST)
                    .attribute("title")
                    .association("author", Self::USER)
                    .collection("comments", Self::COMMENT),
            )
            .entity(EntityDescriptor::new(Self::COMMENT).attribute("body"))
            .build()
    }
}
