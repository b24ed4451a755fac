//! Tracing setup for urlsift.
//!
//! Batch summaries, import deletions and config creation log at `info`;
//! database opens and unresolved duplicate origins at `debug`; every duplicate
//! hit at `trace`. Output goes to `urlsift.log` in the XDG state directory,
//! next to `links.db`. `RUST_LOG` overrides the default filter.

use anyhow::Result;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "urlsift.log";

/// Debug for our own crates, info for sqlx and everything else.
const DEFAULT_FILTER: &str = "info,urlsift=debug,urlsift_core=debug,urlsift_cli=debug";

/// Per-event writer handed out by [`LogFile`]. Falls back to stderr when the
/// file handle cannot be duplicated, so a batch never fails over logging.
enum LogSink {
    File(File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0.try_clone().map(LogSink::File).unwrap_or(LogSink::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `urlsift.log` inside `state_dir`, creating the directory if needed.
fn prepare_log_file(state_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(state_dir)?;
    Ok(state_dir.join(LOG_FILE_NAME))
}

/// Sends urlsift's logs to `~/.local/state/urlsift/urlsift.log`.
///
/// Errors (unwritable state dir, subscriber already set) are returned so the
/// CLI can switch to [`init_logging_stderr`] and keep going.
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlsift")?;
    let path = prepare_log_file(&xdg_dirs.get_state_home())?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!(log = %path.display(), "urlsift logging started");
    Ok(())
}

/// Stderr-only logging for when the log file is unavailable.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
