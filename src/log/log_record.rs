use crate::log::{date_key::DateKey, log_level::LogLevel};

/// A single log event, stamped at the call site.
///
/// The record carries the day it was created on; that day picks both the
/// date printed in the line and the file the line lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Calendar day the record was created on.
    pub day: DateKey,
    /// Severity of the record.
    pub level: LogLevel,
    /// The message text, written verbatim.
    pub message: String,
}

impl LogRecord {
    /// Creates a new `LogRecord`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use asynclog::log::{DateKey, LogLevel, LogRecord};
    ///
    /// let day = DateKey::from_ymd(2024, 1, 1).expect("valid date");
    /// let rec = LogRecord::new(day, LogLevel::Warning, "disk almost full");
    /// assert_eq!(rec.format_line(), "[2024-01-01] [WARNING] disk almost full\n");
    /// ```
    pub fn new(day: DateKey, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            day,
            level,
            message: message.into(),
        }
    }

    /// Renders `"[YYYY-MM-DD] [LEVEL] message\n"`.
    #[must_use]
    pub fn format_line(&self) -> String {
        format!("[{}] [{}] {}\n", self.day, self.level, self.message)
    }
}

/// A formatted line waiting in the queue, tagged with the day file it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedLine {
    pub day: DateKey,
    pub line: String,
}

impl From<&LogRecord> for QueuedLine {
    fn from(rec: &LogRecord) -> Self {
        Self {
            day: rec.day,
            line: rec.format_line(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn format_line_for_each_level() {
        let day = DateKey::from_ymd(2024, 1, 1).unwrap();
        assert_eq!(
            LogRecord::new(day, LogLevel::Info, "a").format_line(),
            "[2024-01-01] [INFO] a\n"
        );
        assert_eq!(
            LogRecord::new(day, LogLevel::Error, "c").format_line(),
            "[2024-01-01] [ERROR] c\n"
        );
    }

    #[test]
    fn empty_message_keeps_trailing_space() {
        let day = DateKey::from_ymd(2024, 3, 9).unwrap();
        assert_eq!(
            LogRecord::new(day, LogLevel::Info, "").format_line(),
            "[2024-03-09] [INFO] \n"
        );
    }

    #[test]
    fn queued_line_keeps_record_day() {
        let day = DateKey::from_ymd(2024, 2, 29).unwrap();
        let q = QueuedLine::from(&LogRecord::new(day, LogLevel::Warning, "b"));
        assert_eq!(q.day, day);
        assert_eq!(q.line, "[2024-02-29] [WARNING] b\n");
    }
}
