//! Leveled logging macros for anything implementing `LogSink`
//! (`Logger`, `LoggerHandle`, `Arc<dyn LogSink>`, ...).
//!
//! ```rust,ignore
//! sink_info!(handle, "processed {} items in {:?}", n, elapsed);
//! sink_error!(&logger, "upload failed: {}", err);
//! ```

#[macro_export]
macro_rules! sink_log {
    ($sink:expr, $lvl:expr, $($arg:tt)*) => {{
        let __msg = format!($($arg)*);
        $sink.log($lvl, &__msg);
    }};
}

#[macro_export]
macro_rules! sink_info  { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::log::log_level::LogLevel::Info, $($arg)*) } }
#[macro_export]
macro_rules! sink_warn  { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::log::log_level::LogLevel::Warning, $($arg)*) } }
#[macro_export]
macro_rules! sink_error { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::log::log_level::LogLevel::Error, $($arg)*) } }
