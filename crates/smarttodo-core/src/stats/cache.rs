//! Report memoization keyed by snapshot revision.

use super::completion::{AnalyticsAggregator, AnalyticsReport};
use crate::store::TaskSnapshot;

/// Holds the last computed report and the revision it was built from.
///
/// Aggregation is pure, so a report is reusable for as long as the store
/// revision it came from is current.
#[derive(Debug, Default)]
pub struct ReportCache {
    aggregator: AnalyticsAggregator,
    entry: Option<(u64, AnalyticsReport)>,
}

impl ReportCache {
    pub fn new(aggregator: AnalyticsAggregator) -> Self {
        Self {
            aggregator,
            entry: None,
        }
    }

    /// Report for `snapshot`, recomputed only when its revision changed.
    pub fn report(&mut self, snapshot: &TaskSnapshot) -> &AnalyticsReport {
        if self.cached_revision() != Some(snapshot.revision) {
            self.entry = None;
        }
        let aggregator = self.aggregator;
        let (_, report) = self.entry.get_or_insert_with(|| {
            tracing::debug!(revision = snapshot.revision, "recomputing analytics report");
            (snapshot.revision, aggregator.aggregate(&snapshot.tasks))
        });
        report
    }

    pub fn cached_revision(&self) -> Option<u64> {
        self.entry.as_ref().map(|(revision, _)| *revision)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{ImportanceLevel, Task};
    use chrono::{TimeZone, Utc};

    fn snapshot(revision: u64, completed: usize) -> TaskSnapshot {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        let tasks = (0..completed)
            .map(|i| Task::new(format!("t-{i}"), "Done", ImportanceLevel::Low, now).finished_at(now))
            .collect();
        TaskSnapshot { revision, tasks }
    }

    #[test]
    fn test_reuses_report_for_same_revision() {
        let mut cache = ReportCache::default();
        assert_eq!(cache.report(&snapshot(1, 2)).total_completed, 2);

        // Same revision: the cached report wins even if the payload differs.
        assert_eq!(cache.report(&snapshot(1, 5)).total_completed, 2);
        assert_eq!(cache.cached_revision(), Some(1));
    }

    #[test]
    fn test_recomputes_on_new_revision_or_invalidate() {
        let mut cache = ReportCache::default();
        cache.report(&snapshot(1, 2));
        assert_eq!(cache.report(&snapshot(2, 3)).total_completed, 3);

        cache.invalidate();
        assert_eq!(cache.cached_revision(), None);
        assert_eq!(cache.report(&snapshot(2, 4)).total_completed, 4);
    }
}
