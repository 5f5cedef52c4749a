//! Logger setup.
//!
//! The terminal UI owns stdout and stderr, so records go to a file instead.
//! The filter comes from `RUST_LOG` and defaults to `info`.

use directories::ProjectDirs;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "trex-run.log";

/// Per-user log location, e.g. `~/.local/share/trex-run/trex-run.log`.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "trex-run").map(|dirs| dirs.data_dir().join(LOG_FILE_NAME))
}

/// Route `log` records into `path`, truncating any previous run's log.
pub fn init_file_logger(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}

/// Logger for headless tools: stderr, `warn` unless `RUST_LOG` says otherwise.
pub fn init_stderr_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
