//! Detection of detached lazy accesses.
//!
//! Application code that touches a lazily-loaded collection after the owning
//! persistence context has closed triggers a [`LazyInitializationError`]
//! deep inside an otherwise ordinary failure path. This crate observes such
//! failures post-hoc, recovers the offending entity and field from the error
//! message, resolves the collection's element type against the declared
//! schema and records a structured [`Finding`] into the unit of work's
//! [`DetectionContext`]. The original error always keeps propagating
//! unchanged.
//!
//! # Architecture
//!
//! - [`DetectionContext`]: per-unit-of-work finding store with an ambient
//!   current-context lookup
//! - [`FailureContext`]: the observed error handed to extractors
//! - [`FindingExtractor`]: trait for recognizing a specific runtime failure
//! - [`DetachedAccessExtractor`](extractors::DetachedAccessExtractor):
//!   classifier, message parser and field resolution for detached accesses
//! - [`Collector`]: registry of extractors exposing the observe/watch
//!   wrappers and the fail-open recording step
//! - [`DetectionReport`]: read side handed to downstream reporting
//!
//! # Usage
//!
//! ```ignore
//! let collector = Collector::new(registry);
//! let context = DetectionContext::new();
//!
//! let result = context.scope(collector.watch(handle_request(request))).await;
//!
//! context.report().log();
//! ```

use thiserror::Error;

pub use querykeeper_orm::LazyInitializationError;

mod collector;
mod context;
mod finding;
mod report;

mod extractor;
pub mod extractors;

pub use collector::Collector;
pub use context::DetectionContext;
pub use extractor::{FailureContext, FindingExtractor};
pub use finding::Finding;
pub use report::DetectionReport;

/// Internal failure taxonomy of the detection pipeline. These are logged at
/// debug level and swallowed; they never reach the observed caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("message does not match the detached access format: {0}")]
    UnparseableMessage(String),

    #[error("field cannot be resolved: {0}")]
    Unresolvable(#[from] querykeeper_orm::Error),

    #[error("no detection context is active")]
    NoActiveContext,
}
