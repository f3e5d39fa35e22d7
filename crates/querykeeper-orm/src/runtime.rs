use thiserror::Error;

/// Error raised by the lazy-loading layer when a proxied collection or
/// association is touched after its owning persistence context has closed.
///
/// The detection pipeline only ever inspects this error; it is produced by
/// the persistence runtime and propagated through the application untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LazyInitializationError {
    message: String,
}

impl LazyInitializationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Renders the canonical message for a detached collection access, where
    /// `path` is the qualified field path (e.g. `com.example.demo.User.roles`).
    pub fn for_collection(path: &str) -> Self {
        Self::new(format!("failed to lazily initialize a collection: {}, could not initialize proxy - no session", path))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_collection_renders_qualified_path() {
        let error = LazyInitializationError::for_collection("com.example.demo.User.roles");

        assert_eq!(
            error.to_string(),
            "failed to lazily initialize a collection: com.example.demo.User.roles, could not initialize proxy - no session"
        );
    }

    #[test]
    fn display_is_the_raw_message() {
        let error = LazyInitializationError::new("unexpected error");

        assert_eq!(error.to_string(), "unexpected error");
        assert_eq!(error.message(), "unexpected error");
    }
}
