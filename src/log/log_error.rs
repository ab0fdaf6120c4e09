use std::{fmt, io, path::PathBuf};

/// Errors from the logging pipeline itself.
///
/// None of these reach callers of `log()`; the worker reports them through
/// [`diagnostics::report`](crate::log::diagnostics::report) and carries on.
/// [`LogError::Spawn`] is returned from `Logger::start` and
/// [`LogError::Stopped`] from `try_log`.
#[derive(Debug)]
pub enum LogError {
    CreateDir { path: PathBuf, source: io::Error },
    Open { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    Stdout(io::Error),
    Spawn(io::Error),
    /// The logger was stopped; records are no longer accepted.
    Stopped,
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => {
                write!(f, "failed to create log directory {}: {source}", path.display())
            }
            Self::Open { path, source } => {
                write!(f, "failed to open log file {}: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write log file {}: {source}", path.display())
            }
            Self::Stdout(e) => write!(f, "failed to mirror log line to stdout: {e}"),
            Self::Spawn(e) => write!(f, "failed to spawn logger worker: {e}"),
            Self::Stopped => write!(f, "logger is stopped"),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. }
            | Self::Open { source, .. }
            | Self::Write { source, .. } => Some(source),
            Self::Stdout(e) | Self::Spawn(e) => Some(e),
            Self::Stopped => None,
        }
    }
}
