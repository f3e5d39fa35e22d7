use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::finding::Finding;
use crate::report::DetectionReport;

tokio::task_local! {
    static CURRENT: DetectionContext;
}

/// Finding store for a single unit of work (one request, one job run).
///
/// The context is a cheap clone-able handle over shared state: install it
/// with [`Self::scope`] or [`Self::sync_scope`] around the traced work, and
/// the recording side retrieves it through [`Self::current`]. Concurrent
/// units of work each install their own context and never see each other's
/// findings. The handle outlives its scope, so callers can read the
/// accumulated findings once the traced work has completed.
#[derive(Debug, Clone, Default)]
pub struct DetectionContext {
    findings: Arc<Mutex<Vec<Finding>>>,
}

impl DetectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the future with this context installed as the current one for
    /// the task, including any futures it awaits.
    pub async fn scope<F: Future>(&self, future: F) -> F::Output {
        CURRENT.scope(self.clone(), future).await
    }

    /// Synchronous variant of [`Self::scope`] for blocking units of work.
    pub fn sync_scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        CURRENT.sync_scope(self.clone(), f)
    }

    /// Returns the context installed for the running unit of work, if any.
    pub fn current() -> Option<DetectionContext> {
        CURRENT.try_with(|context| context.clone()).ok()
    }

    /// Appends a finding, preserving insertion order. Accesses are recorded
    /// as they happen; the same access observed twice yields two findings.
    pub fn mark_detached_access(&self, finding: Finding) {
        let mut findings = self.findings.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        findings.push(finding);
    }

    /// Snapshot of the findings recorded so far.
    pub fn findings(&self) -> Vec<Finding> {
        self.findings.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.findings.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn report(&self) -> DetectionReport {
        DetectionReport::new(self.findings())
    }
}
