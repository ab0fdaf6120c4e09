//! asynclog is a process-local asynchronous logger.
//!
//! Callers enqueue records from any thread without waiting on I/O; a single
//! background worker writes them, in order, to `logs/<YYYY-MM-DD>.log` and to
//! stdout. Error records additionally fire a best-effort Telegram
//! notification.
//!
//! ```rust,no_run
//! use asynclog::config::Config;
//! use asynclog::log::{LogLevel, Logger};
//!
//! let config = Config::load_or_empty(".env");
//! let logger = Logger::from_config(&config).expect("logger thread");
//! logger.log(LogLevel::Info, "service started");
//! logger.error("database unreachable"); // also notifies
//! logger.stop();
//! ```

/// Settings file loading (`.env` style key/value pairs).
pub mod config;
/// The logger: queue, worker, day-partitioned files, process-wide instance.
pub mod log;
/// Out-of-band notifications for error records.
pub mod notify;
