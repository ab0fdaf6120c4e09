//! Optional process-wide logger.
//!
//! Prefer constructing a [`Logger`] at the top of `main` and passing handles
//! around. This module exists for code that wants a single shared instance
//! without plumbing: it is initialised exactly once, from the `.env` settings
//! in the working directory, on first access from any thread.
//!
//! Statics are never dropped, so call [`stop_global`] before exiting to
//! drain the queue. There is no re-initialisation after stop.

use crate::{
    config::{Config, DEFAULT_SETTINGS_PATH},
    log::{diagnostics, log_level::LogLevel, logger::Logger},
};

use std::sync::OnceLock;

static GLOBAL: OnceLock<Option<Logger>> = OnceLock::new();

/// The process-wide logger, started on first call.
///
/// `None` only if startup failed (the worker thread could not be spawned);
/// the failure is reported once.
pub fn global() -> Option<&'static Logger> {
    GLOBAL
        .get_or_init(|| {
            let config = Config::load_or_empty(DEFAULT_SETTINGS_PATH);
            match Logger::from_config(&config) {
                Ok(logger) => Some(logger),
                Err(e) => {
                    diagnostics::report(format_args!("global logger unavailable: {e}"));
                    None
                }
            }
        })
        .as_ref()
}

/// Logs through the process-wide logger.
pub fn log<S: Into<String>>(level: LogLevel, text: S) {
    match global() {
        Some(logger) => logger.log(level, text),
        None => {
            let text: String = text.into();
            diagnostics::report(format_args!(
                "global logger unavailable; dropped [{level}] {text}"
            ));
        }
    }
}

/// Stops the process-wide logger if it was ever started. Idempotent.
pub fn stop_global() {
    if let Some(Some(logger)) = GLOBAL.get() {
        logger.stop();
    }
}
