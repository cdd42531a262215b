//! File-based tracing.
//!
//! The terminal belongs to the TUI, so events go to `santri.log` in the data
//! directory instead of stderr. Filtered by `RUST_LOG`, default `info`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name of the log inside the data directory.
pub const LOG_FILE: &str = "santri.log";

/// Initializes the global subscriber, appending to `<dir>/santri.log`.
///
/// Returns the log file path.
#[mutants::skip]
pub fn init(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();

    Ok(path)
}
