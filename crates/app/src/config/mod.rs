use std::path::PathBuf;

use ingest::{AllowList, DEFAULT_STORE_UTC_OFFSET_HOURS, Normalizer, offset_from_hours};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const ENV_SOURCE: &str = "CAL_TRACKER_SOURCE";
pub const ENV_ICS_DIR: &str = "CAL_TRACKER_ICS_DIR";
pub const ENV_STORE_PATH: &str = "CAL_TRACKER_STORE_PATH";
pub const ENV_CALENDARS: &str = "CAL_TRACKER_CALENDARS";
pub const ENV_UTC_OFFSET: &str = "CAL_TRACKER_UTC_OFFSET";

const DEFAULT_ICS_DIR: &str = "ics";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Ics,
    Store,
}

impl std::str::FromStr for SourceKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ics" => Ok(Self::Ics),
            "store" => Ok(Self::Store),
            other => Err(AppError::InvalidInput(format!(
                "unsupported source {other:?} (expected \"ics\" or \"store\")"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct IcsConfig {
    pub dir: PathBuf,
}

impl Default for IcsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_ICS_DIR),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub calendars: Vec<String>,
}

/// Which calendar source to read and how to interpret it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceKind,
    #[serde(default = "default_utc_offset_hours")]
    pub store_utc_offset_hours: i32,
    #[serde(default)]
    pub ics: IcsConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            store_utc_offset_hours: default_utc_offset_hours(),
            ics: IcsConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_STORE_UTC_OFFSET_HOURS
}

impl AppConfig {
    /// Applies `CAL_TRACKER_*` variables from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SOURCE) {
            self.source = value.parse()?;
        }
        if let Some(value) = lookup(ENV_ICS_DIR) {
            self.ics.dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_STORE_PATH) {
            self.store.path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(ENV_CALENDARS) {
            self.store.calendars = parse_calendar_list(&value);
        }
        if let Some(value) = lookup(ENV_UTC_OFFSET) {
            self.store_utc_offset_hours = value.trim().parse().map_err(|_| {
                AppError::InvalidInput(format!("invalid {ENV_UTC_OFFSET} value: {value}"))
            })?;
        }
        Ok(())
    }

    pub fn normalizer(&self) -> Result<Normalizer> {
        let offset = offset_from_hours(self.store_utc_offset_hours).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "store_utc_offset_hours out of range: {}",
                self.store_utc_offset_hours
            ))
        })?;
        Ok(Normalizer::new(offset))
    }

    pub fn allow_list(&self) -> AllowList {
        AllowList::new(&self.store.calendars)
    }

    pub fn store_path(&self) -> Result<&PathBuf> {
        self.store
            .path
            .as_ref()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| AppError::InvalidInput("store.path is not configured".to_string()))
    }
}

/// Splits a comma-separated allow-list, dropping blank entries.
pub fn parse_calendar_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
