//! Tracing setup for the binary.
//!
//! The filter comes from `CUEPLAY_LOG` (default `warn`). CLI commands log to
//! stderr; the interactive player logs to a file so the alternate screen
//! stays intact.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CUEPLAY_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Default log file of the interactive player.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("cueplay").join("cueplay.log"))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(target: LogTarget) {
    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref());
    let ansi = target == LogTarget::Stderr && atty::is(atty::Stream::Stderr);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer(&target))
        .with_ansi(ansi)
        .try_init();
}

/// Filter from a directive string, falling back to `warn` when unset or
/// invalid.
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn make_writer(target: &LogTarget) -> BoxMakeWriter {
    match target {
        LogTarget::Stderr => BoxMakeWriter::new(io::stderr),
        LogTarget::File(path) => match open_log_file(path) {
            Ok(file) => {
                let shared = SharedLogWriter::new(file);
                BoxMakeWriter::new(move || shared.clone())
            }
            Err(err) => {
                eprintln!(
                    "Could not open log file {}: {}. Logging disabled.",
                    path.display(),
                    err
                );
                BoxMakeWriter::new(io::sink)
            }
        },
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// A log file shared by every writer the subscriber makes.
#[derive(Clone)]
struct SharedLogWriter {
    inner: Arc<Mutex<File>>,
}

impl SharedLogWriter {
    fn new(file: File) -> Self {
        Self {
            inner: Arc::new(Mutex::new(file)),
        }
    }
}

impl Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
        guard.flush()
    }
}
