use crate::log::log_level::LogLevel;

/// Anything that accepts formatted log lines. Target of the `sink_*!` macros.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str);
}
