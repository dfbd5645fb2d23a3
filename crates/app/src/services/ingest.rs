use ingest::IngestStats;
use tracing::info;
use tracker_core::EventStore;

use crate::config::SourceKind;
use crate::error::Result;
use crate::services::SharedConfig;

#[derive(Clone)]
pub struct IngestService {
    config: SharedConfig,
}

impl IngestService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Reads the configured source into `store`.
    pub fn run(&self, store: &mut EventStore) -> Result<IngestStats> {
        let normalizer = self.config.normalizer()?;
        let stats = match self.config.source {
            SourceKind::Ics => {
                info!(dir = %self.config.ics.dir.display(), "reading ics directory");
                ingest::ingest_ics_dir(&self.config.ics.dir, &normalizer, store)?
            }
            SourceKind::Store => {
                let path = self.config.store_path()?;
                info!(store = %path.display(), "reading calendar store");
                ingest::ingest_calendar_store(path, &self.config.allow_list(), &normalizer, store)?
            }
        };
        Ok(stats)
    }
}
