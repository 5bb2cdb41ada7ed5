#![forbid(unsafe_code)]

//! File logging for the demo.
//!
//! The terminal belongs to the showcase, so tracing output goes to the file
//! named by `TYPEWRITER_LOG`. `RUST_LOG` filters it; without it the
//! typewriter crates log at `debug`. Nothing is installed when the variable
//! is unset.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TYPEWRITER_LOG";

const DEFAULT_FILTER: &str = "typewriter_core=debug,typewriter_runtime=debug,typewriter_demo=debug";

/// Subscriber writing plain-text events to `file`.
pub fn file_subscriber(file: File, filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .finish()
}

/// Install the global subscriber from the process environment.
///
/// Returns `Ok(true)` when a log file was opened.
pub fn init_from_env() -> io::Result<bool> {
    init_with(|key| env::var(key).ok())
}

/// Install the global subscriber using an injectable environment getter.
pub fn init_with<F>(get: F) -> io::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(path) = get(LOG_ENV).filter(|p| !p.trim().is_empty()) else {
        return Ok(false);
    };
    let file = open_log(Path::new(&path))?;
    let filter = get("RUST_LOG")
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));
    tracing::subscriber::set_global_default(file_subscriber(file, filter))
        .map_err(io::Error::other)?;
    tracing::info!(path = %path, "logging initialized");
    Ok(true)
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn unset_or_blank_installs_nothing() {
        assert!(!init_with(|_| None).unwrap());
        assert!(!init_with(|key| (key == LOG_ENV).then(|| "  ".to_string())).unwrap());
    }

    #[test]
    fn file_subscriber_writes_filtered_events() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let file = open_log(tmp.path()).unwrap();
        let subscriber = file_subscriber(file, EnvFilter::new("info"));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(block = "Basic", "text typed");
            tracing::debug!("hidden by filter");
        });
        let contents = fs::read_to_string(tmp.path()).unwrap();
        assert!(contents.contains("text typed"));
        assert!(contents.contains("block=\"Basic\""));
        assert!(!contents.contains("hidden by filter"));
        assert!(!contents.contains('\u{1b}'));
    }
}
