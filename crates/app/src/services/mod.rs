mod analytics;
mod ingest;

use std::sync::Arc;

use crate::config::AppConfig;

pub use self::analytics::AnalyticsService;
pub use self::ingest::IngestService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub analytics: AnalyticsService,
    pub ingest: IngestService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            analytics: AnalyticsService::new(),
            ingest: IngestService::new(shared),
        }
    }
}
