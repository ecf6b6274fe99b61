//! File logging.
//!
//! The terminal belongs to the animation, so log output goes to
//! `tessera.log` in the platform data directory instead.

use std::fs::{self, File, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TESSERA_LOG=debug`.
const LOG_ENV: &str = "TESSERA_LOG";

const LOG_FILE: &str = "tessera.log";

/// Install the global subscriber. Logging stays off if the file cannot be opened.
pub fn init() {
    let Some(file) = open_log_file() else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber installed earlier keeps precedence
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok();
}

fn open_log_file() -> Option<File> {
    let dirs = tessera_config::project_dirs()?;
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
        .ok()
}
