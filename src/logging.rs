//! Logging infrastructure.
//!
//! Structured file logging with daily rotation to platform-standard directories.
//! The terminal belongs to the form, so nothing is logged to stdout or stderr.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;

/// File name prefix for rotated log files.
const LOG_FILE_PREFIX: &str = "git-convention";

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
const LOG_ENV_VAR: &str = "GIT_CONVENTION_LOG";

/// Result of initializing the logging system.
pub struct LoggingContext {
    /// Guard that must be held for the application lifetime to ensure logs are flushed.
    pub _guard: WorkerGuard,
    /// The session ID for this invocation.
    pub session_id: String,
    /// The directory where logs are written.
    pub log_directory: PathBuf,
}

/// Why file logging could not be set up. Never fatal to the caller.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to determine log directory")]
    NoLogDir,

    #[error("Failed to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to install log subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Generates a 6-character random hex session ID.
fn generate_session_id() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    let bytes: [u8; 3] = rng.random();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Filter from `GIT_CONVENTION_LOG`, then `RUST_LOG`, then `info`.
fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Platform log directory.
///
/// macOS: `~/Library/Logs/git-convention/`
/// Linux: `~/.local/state/git-convention/`
/// Windows: `%LocalAppData%\git-convention\`
fn resolve_log_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        return dirs::home_dir().map(|home| home.join("Library/Logs").join(LOG_FILE_PREFIX));
    }
    let project = ProjectDirs::from("dev", "git-convention", "git-convention")?;
    Some(
        project
            .state_dir()
            .unwrap_or_else(|| project.data_local_dir())
            .to_path_buf(),
    )
}

/// Installs the file subscriber and starts the session.
///
/// Hold the returned context until exit; dropping its guard flushes the log.
pub fn init() -> Result<LoggingContext, LoggingError> {
    let session_id = generate_session_id();

    let log_dir = resolve_log_dir().ok_or(LoggingError::NoLogDir)?;
    fs::create_dir_all(&log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_span_events(FmtSpan::NONE)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter())
        .with(fmt_layer)
        .try_init()?;

    info!(session_id = %session_id, "session_start");

    Ok(LoggingContext {
        _guard: guard,
        session_id,
        log_directory: log_dir,
    })
}

/// Whether a file name belongs to a rotated log (`git-convention.YYYY-MM-DD`).
fn is_rotated_log(name: &str) -> bool {
    name.strip_prefix(LOG_FILE_PREFIX)
        .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1)
}

/// Rotated logs older than this are deleted at startup.
const LOG_RETENTION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Age of a rotated log file, or `None` if it is not one of ours.
fn rotated_log_age(path: &Path, now: SystemTime) -> Option<io::Result<Duration>> {
    let name = path.file_name()?.to_str()?;
    if !is_rotated_log(name) {
        return None;
    }
    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(e) => return Some(Err(e)),
    };
    // Timestamps in the future count as fresh
    Some(Ok(now.duration_since(modified).unwrap_or_default()))
}

/// Deletes rotated logs past the retention period.
///
/// Failures are logged and skipped; startup never depends on cleanup.
pub fn cleanup_old_logs(log_dir: &Path) {
    let entries = match fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %log_dir.display(), error = %e, "log_cleanup_unreadable");
            return;
        }
    };

    let now = SystemTime::now();
    let mut removed = 0u32;
    for path in entries.filter_map(Result::ok).map(|entry| entry.path()) {
        let age = match rotated_log_age(&path, now) {
            None => continue,
            Some(Ok(age)) => age,
            Some(Err(e)) => {
                warn!(file = %path.display(), error = %e, "log_cleanup_metadata_failed");
                continue;
            }
        };
        if age <= LOG_RETENTION {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => warn!(file = %path.display(), error = %e, "log_cleanup_delete_failed"),
        }
    }

    if removed > 0 {
        debug!(count = removed, "log_cleanup_done");
    }
}
