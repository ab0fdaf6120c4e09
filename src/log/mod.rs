pub mod clock;
pub mod date_key;
pub mod diagnostics;
pub mod file_sink;
pub mod global;
pub mod log_error;
pub mod log_level;
pub mod log_macros;
pub mod log_record;
pub mod log_sink;
pub mod logger;
pub mod logger_handle;
pub mod logger_options;
pub mod worker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use date_key::DateKey;
pub use log_error::LogError;
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use log_sink::LogSink;
pub use logger::Logger;
pub use logger_handle::LoggerHandle;
pub use logger_options::LoggerOptions;
