use tracing::{info, warn};
use tracker_core::{Aggregates, EventStore};

#[derive(Clone, Default)]
pub struct AnalyticsService;

impl AnalyticsService {
    pub(super) fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, store: &EventStore) -> Aggregates {
        let non_positive = store.non_positive_durations();
        if non_positive > 0 {
            warn!(
                events = non_positive,
                "aggregating events with zero or negative duration"
            );
        }
        let aggregates = Aggregates::from_store(store);
        info!(
            events = store.len(),
            subcategories = aggregates.by_subcategory.len(),
            months = aggregates.by_month.len(),
            combinations = aggregates.by_category_month.len(),
            total_hours = aggregates.total_duration(),
            "aggregated events"
        );
        aggregates
    }
}
