use std::fmt;

/// Severity of a log record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Progress of the application at a coarse-grained level.
    Info,
    /// Potentially harmful situations.
    Warning,
    /// Errors. Records at this level also trigger a notification.
    Error,
}

impl LogLevel {
    /// Tag written between brackets in every log line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    #[must_use]
    pub const fn notifies(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_file_format() {
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Warning.as_str(), "WARNING");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn only_error_notifies() {
        assert!(!LogLevel::Info.notifies());
        assert!(!LogLevel::Warning.notifies());
        assert!(LogLevel::Error.notifies());
    }
}
