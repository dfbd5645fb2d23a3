use ingest::IngestStats;
use serde::Serialize;
use tracker_core::{Aggregates, EventStore};

use crate::config::AppConfig;
use crate::error::Result;
use crate::services::AppServices;

/// Outcome of one pipeline run: what was read and the tables built from it.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub stats: IngestStats,
    pub aggregates: Aggregates,
}

/// Application state shared by frontends.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let services = AppServices::new(&config);
        Self { config, services }
    }

    /// Reads the source, builds a fresh event store and aggregates it.
    pub fn run(&self) -> Result<RunReport> {
        let mut store = EventStore::new();
        let stats = self.services.ingest.run(&mut store)?;
        let aggregates = self.services.analytics.aggregate(&store);
        Ok(RunReport { stats, aggregates })
    }
}
