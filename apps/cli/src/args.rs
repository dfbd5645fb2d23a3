use std::env;
use std::path::PathBuf;

use tracker_app::{AppConfig, SourceKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub ics_dir: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub calendars: Option<Vec<String>>,
    pub format: OutputFormat,
    pub help: bool,
}

impl CliArgs {
    /// Flags win over the config file and environment.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.ics_dir {
            config.source = SourceKind::Ics;
            config.ics.dir = dir.clone();
        }
        if let Some(path) = &self.store {
            config.source = SourceKind::Store;
            config.store.path = Some(path.clone());
        }
        if let Some(calendars) = &self.calendars {
            config.store.calendars = calendars.clone();
        }
    }
}

pub fn parse_args() -> Result<CliArgs, String> {
    parse_args_from(env::args().skip(1))
}

pub fn parse_args_from<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                parsed.config = Some(PathBuf::from(value_for(&mut args, "--config")?));
            }
            "--ics-dir" => {
                parsed.ics_dir = Some(PathBuf::from(value_for(&mut args, "--ics-dir")?));
            }
            "--store" => {
                parsed.store = Some(PathBuf::from(value_for(&mut args, "--store")?));
            }
            "--calendars" => {
                let value = value_for(&mut args, "--calendars")?;
                parsed.calendars = Some(tracker_app::config::parse_calendar_list(&value));
            }
            "--format" => {
                let value = value_for(&mut args, "--format")?;
                parsed.format = match value.as_str() {
                    "json" => OutputFormat::Json,
                    "text" => OutputFormat::Text,
                    _ => return Err(format!("invalid format value: {value}")),
                };
            }
            "--help" | "-h" => {
                parsed.help = true;
            }
            _ => {
                return Err(format!("unknown argument: {arg}"));
            }
        }
    }

    if parsed.ics_dir.is_some() && parsed.store.is_some() {
        return Err("--ics-dir and --store cannot be combined".to_string());
    }
    Ok(parsed)
}

fn value_for(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("missing value for {flag}"))
}

pub fn print_help() {
    println!(
        "Calendar Tracker CLI\n\n\
Usage:\n  cal-tracker [--config <path>] [--ics-dir <dir> | --store <path>] [--calendars <a,b>] [--format json|text]\n\n\
Options:\n  --config <path>     Read settings from this file instead of the default config\n  --ics-dir <dir>     Read exported .ics files from <dir>\n  --store <path>      Read the calendar app's SQLite store at <path>\n  --calendars <a,b>   Calendars to keep when reading the store\n  --format <fmt>      Output format: json (default) or text\n  -h, --help          Show this help message\n\n\
Environment:\n  CAL_TRACKER_SOURCE, CAL_TRACKER_ICS_DIR, CAL_TRACKER_STORE_PATH,\n  CAL_TRACKER_CALENDARS, CAL_TRACKER_UTC_OFFSET, RUST_LOG\n"
    );
}
