// Structured logging with tracing, written to a file since the TUI owns the terminal

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Default log location (~/.cache/pswp/pswp.log)
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("pswp").join("pswp.log"))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Returns the path being written to. Calling this twice leaves the first
/// subscriber in place.
pub fn init_logging(level: &str, path: Option<&Path>) -> io::Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_log_path().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not determine cache directory")
        })?,
    };
    let file = open_log_file(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init();

    Ok(path)
}
