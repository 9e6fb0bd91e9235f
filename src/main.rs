//! Sentinel - headless enemy AI arena
//!
//! Usage: `sentinel [settings.toml] [--write-settings]`

mod arena;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::FmtSubscriber;

use arena::Arena;
use settings::SimulationSettings;

fn log_subscriber<W>(level: Level, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(writer)
        .finish()
}

/// Load settings with an INFO subscriber active, since the configured level
/// is only known afterwards
fn load_settings<W>(path: Option<&Path>, writer: W) -> SimulationSettings
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing::subscriber::with_default(log_subscriber(Level::INFO, writer), || {
        SimulationSettings::load(path)
    })
}

fn main() -> Result<()> {
    let mut settings_path: Option<PathBuf> = None;
    let mut write_settings = false;
    for arg in std::env::args().skip(1) {
        if arg == "--write-settings" {
            write_settings = true;
        } else {
            settings_path = Some(PathBuf::from(arg));
        }
    }

    let settings = load_settings(settings_path.as_deref(), std::io::stdout);

    // Initialize logging
    let subscriber = log_subscriber(settings.log.max_level(), std::io::stdout);
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Sentinel arena...");

    if write_settings {
        match &settings_path {
            Some(path) => settings.save_to(path)?,
            None => {
                settings.save()?;
            }
        }
    }

    let mut arena = Arena::new(&settings)?;
    arena.run();
    Ok(())
}
