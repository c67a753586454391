//! Rotaboard - weighted widget rotation runner
//!
//! Usage: `rotaboard [CONFIG]`
//!
//! Loads the configuration (explicit path, or the standard locations),
//! rotates through the configured HTTP widgets and prints each successful
//! payload to stdout as a JSON line until Ctrl-C.

mod listener;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use rotaboard_domain::Config;
use rotaboard_infra::observability::metrics::RotationMetrics;
use rotaboard_infra::scheduling::{RotationScheduler, RotationSchedulerConfig};
use rotaboard_infra::{build_http_widgets, config};
use tracing::{info, warn};

use crate::listener::JsonLinesListener;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    logging::init();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    config.validate().context("invalid configuration")?;

    let widgets = build_http_widgets(&config.widgets, config.rotation.widget_timeout())
        .context("failed to build widgets")?;
    let metrics = Arc::new(RotationMetrics::new());
    let mut scheduler = RotationScheduler::new(
        widgets,
        RotationSchedulerConfig::from(&config.rotation),
        Arc::clone(&metrics),
    )
    .context("no widgets configured")?;

    scheduler.start(Arc::new(JsonLinesListener::new(std::io::stdout())))?;
    info!("Rotaboard running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await.context("failed to listen for Ctrl-C")?;
    info!("Shutdown requested");
    scheduler.stop().await?;

    let stats = metrics.snapshot();
    info!(
        cycles = stats.cycles,
        deliveries = stats.deliveries,
        failures = stats.failures,
        timeouts = stats.timeouts,
        "Rotaboard stopped"
    );
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => config::apply_env_overrides(config::load_from_file(Some(path))?)?,
        None => config::load()?,
    };
    Ok(config)
}
