//! File-backed `tracing` setup.
//!
//! The terminal belongs to the UI while the screen is open, so log lines can't
//! go to stdout or stderr without tearing the display. They are appended to a
//! file instead.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to `path` at `level`.
///
/// `RUST_LOG`, when set, replaces `level` entirely. Parent directories of
/// `path` are created as needed.
pub fn init(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level `{level}`"))?;

    // `Mutex<File>` implements `MakeWriter`, serialising writes from any
    // thread the runtime happens to log from.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing tracing subscriber: {err}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so this is
    // the single test that calls `init`.
    #[test]
    fn init_creates_log_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("game.log");
        init(&path, "debug").unwrap();
        assert!(path.is_file());

        tracing::error!("hello from the test");
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("hello from the test"));
    }
}
