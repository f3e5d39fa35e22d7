//! Detached lazy access extractor.
//!
//! Recognizes the lazy-initialization error raised when a collection proxy
//! is touched after its owning persistence context has closed, and recovers
//! the offending entity and field from the error message.

use std::sync::Arc;

use lazy_static::lazy_static;
use querykeeper_orm::{simple_name, EntityRegistry, LazyInitializationError};
use regex::Regex;
use tracing::debug;

use crate::extractor::{FailureContext, FindingExtractor};
use crate::finding::Finding;
use crate::Error;

lazy_static! {
    /// Matches `: <dotted.declaring.Type>.<field>` embedded anywhere in the
    /// message. The declaring-type group accepts word characters and dots,
    /// the field group word characters only.
    static ref ACCESS_PATH: Regex = Regex::new(r"^.*: ([\w.]+)\.(\w+).*$").expect("invalid regex");
}

/// Extractor for accesses of lazily-loaded collections after detach.
///
/// The pipeline is gated three times, and a finding is produced only when
/// every gate passes:
///
/// 1. the observed error is exactly a [`LazyInitializationError`] (kind
///    check, other errors are ignored before any parsing)
/// 2. its message matches the access-path pattern, all-or-nothing
/// 3. the declared field resolves to a collection in the entity registry
///
/// The element type's simple name becomes `entity_name`, the declaring
/// type's simple name becomes `root_entity`. Parse or resolution failures
/// drop the observation with a debug log.
#[derive(Clone)]
pub struct DetachedAccessExtractor {
    registry: Arc<EntityRegistry>,
}

impl DetachedAccessExtractor {
    pub fn new(registry: Arc<EntityRegistry>) -> Self {
        Self { registry }
    }

    /// Splits the message into the qualified declaring type and the field
    /// name. No partial extraction: either the whole pattern matches or the
    /// message is rejected.
    fn parse(message: &str) -> Result<(String, String), Error> {
        let captures = ACCESS_PATH.captures(message).ok_or_else(|| Error::UnparseableMessage(message.to_string()))?;

        match (captures.get(1), captures.get(2)) {
            (Some(declaring), Some(field)) => Ok((declaring.as_str().to_string(), field.as_str().to_string())),
            _ => Err(Error::UnparseableMessage(message.to_string())),
        }
    }

    fn extract(&self, message: &str) -> Result<Finding, Error> {
        let (declaring, field) = Self::parse(message)?;
        let element = self.registry.resolve_element_type(&declaring, &field)?;

        Ok(Finding::detached_access(simple_name(element), &field, simple_name(&declaring)))
    }
}

impl FindingExtractor for DetachedAccessExtractor {
    fn name(&self) -> &'static str {
        "detached_access"
    }

    fn try_extract(&self, failure: &FailureContext<'_>) -> Option<Finding> {
        if !failure.is::<LazyInitializationError>() {
            return None;
        }

        let message = failure.message();
        match self.extract(&message) {
            Ok(finding) => Some(finding),
            Err(error) => {
                debug!(message = %message, %error, "detached access observed but not extracted");
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querykeeper_orm::testing::TestEnvironment;

    fn extractor() -> DetachedAccessExtractor {
        DetachedAccessExtractor::new(Arc::new(TestEnvironment::schema()))
    }

    fn lazy_error(path: &str) -> LazyInitializationError {
        LazyInitializationError::for_collection(path)
    }

    mod parse {
        use super::*;

        #[test]
        fn should_split_declaring_type_and_field() {
            let (declaring, field) =
                DetachedAccessExtractor::parse("failed to lazily initialize a collection: com.example.demo.User.roles, could not initialize proxy")
                    .expect("parse failed");

            assert_eq!(declaring, "com.example.demo.User");
            assert_eq!(field, "roles");
        }

        #[test]
        fn should_reject_messages_without_an_access_path() {
            let result = DetachedAccessExtractor::parse("unexpected error");

            assert!(matches!(result, Err(Error::UnparseableMessage(_))));
        }

        #[test]
        fn should_reject_empty_messages() {
            let result = DetachedAccessExtractor::parse("");

            assert!(matches!(result, Err(Error::UnparseableMessage(_))));
        }
    }

    mod try_extract {
        use super::*;

        #[test]
        fn should_extract_a_finding_for_a_detached_collection() {
            // Given
            let error = lazy_error("com.example.demo.User.roles");

            // When
            let finding = extractor().try_extract(&FailureContext::new(&error));

            // Then
            assert_eq!(finding, Some(Finding::detached_access("Role", "roles", "User")));
        }

        #[test]
        fn should_ignore_other_error_kinds_even_with_a_matching_message() {
            // The gate is the error kind, not the message content
            let error = std::io::Error::new(
                std::io::ErrorKind::Other,
                "failed to lazily initialize a collection: com.example.demo.User.roles, could not initialize proxy",
            );

            let finding = extractor().try_extract(&FailureContext::new(&error));

            assert_eq!(finding, None);
        }

        #[test]
        fn should_ignore_unmatched_message_formats() {
            let error = LazyInitializationError::new("unexpected error");

            let finding = extractor().try_extract(&FailureContext::new(&error));

            assert_eq!(finding, None);
        }

        #[test]
        fn should_ignore_unknown_entities() {
            let error = lazy_error("com.example.demo.Order.items");

            let finding = extractor().try_extract(&FailureContext::new(&error));

            assert_eq!(finding, None);
        }

        #[test]
        fn should_ignore_unknown_fields() {
            let error = lazy_error("com.example.demo.User.permissions");

            let finding = extractor().try_extract(&FailureContext::new(&error));

            assert_eq!(finding, None);
        }

        #[test]
        fn should_ignore_fields_that_are_not_collections() {
            let error = lazy_error("com.example.demo.Post.author");

            let finding = extractor().try_extract(&FailureContext::new(&error));

            assert_eq!(finding, None);
        }

        #[test]
        fn should_keep_the_simple_names_of_qualified_types() {
            let error = lazy_error("com.example.demo.Post.comments");

            let finding = extractor().try_extract(&FailureContext::new(&error)).expect("no finding");

            assert_eq!(finding.entity_name, "Comment");
            assert_eq!(finding.root_entity, "Post");
            assert_eq!(finding.full_path, "Post.comments");
        }
    }
}
