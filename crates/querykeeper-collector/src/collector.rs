//! Observation client that manages extractors and records findings.

use std::error::Error as StdError;
use std::future::Future;
use std::sync::Arc;

use querykeeper_orm::EntityRegistry;
use tracing::debug;

use crate::context::DetectionContext;
use crate::extractor::{FailureContext, FindingExtractor};
use crate::extractors::DetachedAccessExtractor;
use crate::finding::Finding;
use crate::Error;

/// Observes failures flowing out of traced calls and records the findings
/// its extractors recognize into the current [`DetectionContext`].
///
/// The collector is purely observational and fail-open: the observed result
/// is always returned unchanged, and any internal failure degrades to "no
/// finding recorded". Wrap the call sites to trace with [`Self::observe`]
/// or [`Self::watch`]; the collector never wraps its own internals, so the
/// pipeline cannot feed back into itself.
#[derive(Clone)]
pub struct Collector {
    extractors: Vec<Arc<dyn FindingExtractor>>,
}

impl Collector {
    /// Creates a collector pre-configured with the detached-access
    /// extractor over the given entity registry.
    pub fn new(registry: EntityRegistry) -> Self {
        Self {
            extractors: vec![Arc::new(DetachedAccessExtractor::new(Arc::new(registry)))],
        }
    }

    /// Registers an additional extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn FindingExtractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    pub fn extractor_count(&self) -> usize {
        self.extractors.len()
    }

    /// Inspects a failure that already happened. Every finding produced by
    /// an extractor is recorded into the current detection context. Never
    /// fails and never touches the error.
    pub fn inspect(&self, error: &(dyn StdError + 'static)) {
        let failure = FailureContext::new(error);
        for extractor in &self.extractors {
            if let Some(finding) = extractor.try_extract(&failure) {
                self.record(extractor.name(), finding);
            }
        }
    }

    /// Observes a result on its way out: findings are recorded for the
    /// error case and the result is returned unchanged in every case.
    pub fn observe<T, E: StdError + 'static>(&self, result: Result<T, E>) -> Result<T, E> {
        if let Err(error) = &result {
            self.inspect(error);
        }

        result
    }

    /// Awaits the future, then observes its output. The outcome of the
    /// traced call is returned untouched.
    pub async fn watch<F, T, E>(&self, future: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: StdError + 'static,
    {
        self.observe(future.await)
    }

    fn record(&self, extractor: &str, finding: Finding) {
        let context = match DetectionContext::current().ok_or(Error::NoActiveContext) {
            Ok(context) => context,
            Err(error) => {
                debug!(extractor, path = %finding.full_path, %error, "finding dropped");
                return;
            },
        };

        match serde_json::to_string(&finding) {
            Ok(json) => debug!(extractor, finding = %json, "detached access recorded"),
            Err(_) => debug!(extractor, path = %finding.full_path, "detached access recorded"),
        }

        context.mark_detached_access(finding);
    }
}
