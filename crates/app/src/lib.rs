pub mod app;
pub mod config;
pub mod error;
pub mod services;

pub use app::{AppState, RunReport};
pub use config::{AppConfig, IcsConfig, SourceKind, StoreConfig};
pub use error::{AppError, Result};
pub use services::{AnalyticsService, AppServices, IngestService};
