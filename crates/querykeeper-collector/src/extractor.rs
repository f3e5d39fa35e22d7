//! Core trait and types for finding extraction.

use std::error::Error as StdError;

use crate::finding::Finding;

/// The failure handed to extractors: the error some traced call just
/// returned, wrapped for inspection only. The error itself is never altered
/// and keeps propagating through the caller's normal path.
#[derive(Debug)]
pub struct FailureContext<'a> {
    error: &'a (dyn StdError + 'static),
}

impl<'a> FailureContext<'a> {
    pub fn new(error: &'a (dyn StdError + 'static)) -> Self {
        Self { error }
    }

    /// The observed error, untouched.
    pub fn error(&self) -> &'a (dyn StdError + 'static) {
        self.error
    }

    /// Rendered error message.
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Checks the concrete kind of the observed error. This is an exact
    /// type check, not a message inspection.
    pub fn is<T: StdError + 'static>(&self) -> bool {
        self.error.is::<T>()
    }

    /// Downcasts the observed error to its concrete kind.
    pub fn downcast<T: StdError + 'static>(&self) -> Option<&'a T> {
        self.error.downcast_ref::<T>()
    }
}

/// An extractor recognizes one specific runtime failure and turns it into a
/// [`Finding`].
///
/// Implementations must be total: any internal failure maps to `None`
/// (logged at debug level at most), never a panic and never an error
/// surfaced to the observed caller.
pub trait FindingExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn try_extract(&self, failure: &FailureContext<'_>) -> Option<Finding>;
}
