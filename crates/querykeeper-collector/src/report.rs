use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::finding::Finding;

/// Read-side view over the findings of a unit of work, handed to downstream
/// reporting once the traced work has completed.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub findings: Vec<Finding>,
}

impl DetectionReport {
    pub fn new(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of recorded accesses per dotted path, in first-seen order.
    /// Findings are append-only, so repeated accesses of the same path show
    /// up as counts greater than one.
    pub fn access_counts(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for finding in &self.findings {
            *counts.entry(finding.full_path.clone()).or_insert(0) += 1;
        }

        counts
    }

    /// Logs the report for downstream analysis. Empty reports stay silent.
    pub fn log(&self) {
        if self.is_empty() {
            return;
        }

        match serde_json::to_string(self) {
            Ok(json) => warn!(report = %json, "detached lazy accesses detected"),
            Err(_) => warn!(count = self.len(), "detached lazy accesses detected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn findings() -> Vec<Finding> {
        vec![
            Finding::detached_access("Role", "roles", "User"),
            Finding::detached_access("Comment", "comments", "Post"),
            Finding::detached_access("Role", "roles", "User"),
        ]
    }

    #[test]
    fn access_counts_aggregate_per_path_in_first_seen_order() {
        let report = DetectionReport::new(findings());

        let counts = report.access_counts();

        assert_eq!(counts.get_index(0), Some((&"User.roles".to_string(), &2)));
        assert_eq!(counts.get_index(1), Some((&"Post.comments".to_string(), &1)));
    }

    #[test]
    fn empty_report_has_no_counts() {
        let report = DetectionReport::new(Vec::new());

        assert!(report.is_empty());
        assert!(report.access_counts().is_empty());
    }

    #[test]
    fn log_never_panics() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        DetectionReport::new(findings()).log();
        DetectionReport::new(Vec::new()).log();
    }
}
