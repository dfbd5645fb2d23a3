mod args;
mod config;
mod render;

use std::io::{self, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracker_app::AppState;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;
    if args.help {
        args::print_help();
        return Ok(());
    }

    let loaded = config::load_or_create(args.config.as_deref()).map_err(io::Error::other)?;
    if loaded.created {
        info!(file = %loaded.file.display(), "created default config");
    } else {
        info!(file = %loaded.file.display(), "loaded config");
    }

    let mut app_config = loaded.config;
    app_config
        .apply_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
    args.apply(&mut app_config);

    let state = AppState::new(app_config);
    let report = state
        .run()
        .map_err(|err| io::Error::other(format!("failed to build tables: {}", err)))?;
    info!(
        events = report.stats.events_inserted,
        issues = report.stats.issues.len(),
        "pipeline finished"
    );

    let output = render::render(&report.aggregates, args.format).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
