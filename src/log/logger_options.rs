use crate::{
    config::Config,
    log::{
        clock::{Clock, SystemClock},
        diagnostics,
    },
    notify::{Notify, NotifyMode, TelegramNotifier},
};

use std::{io::Write, path::PathBuf, sync::Arc};

pub const DEFAULT_LOG_DIRECTORY: &str = "logs";

pub const LOG_DIRECTORY_KEY: &str = "LOG_DIRECTORY";
pub const NOTIFY_MODE_KEY: &str = "LOG_NOTIFY_MODE";
const SECTION: &str = "Logging";

/// Everything `Logger::start` needs. Collaborators are injectable so tests
/// can swap the clock, the notifier and the stdout mirror.
pub struct LoggerOptions {
    /// Directory holding the `YYYY-MM-DD.log` files.
    pub dir: PathBuf,
    pub clock: Arc<dyn Clock>,
    pub notifier: Arc<dyn Notify>,
    pub notify_mode: NotifyMode,
    /// Where lines are mirrored; `None` means the process's stdout.
    pub mirror: Option<Box<dyn Write + Send>>,
}

impl LoggerOptions {
    /// Local wall clock, stdout mirror, inline dispatch, and a notifier
    /// without credentials.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            clock: Arc::new(SystemClock),
            notifier: Arc::new(TelegramNotifier::disabled()),
            notify_mode: NotifyMode::Inline,
            mirror: None,
        }
    }

    /// Reads `LOG_DIRECTORY`, `LOG_NOTIFY_MODE` and the `TELEGRAM_*` keys.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let dir = config.get_non_empty_or_default(SECTION, LOG_DIRECTORY_KEY, DEFAULT_LOG_DIRECTORY);
        let notify_mode = match config.lookup(SECTION, NOTIFY_MODE_KEY) {
            None => NotifyMode::default(),
            Some(raw) => NotifyMode::parse(raw).unwrap_or_else(|| {
                diagnostics::report(format_args!(
                    "warning: {NOTIFY_MODE_KEY}={raw} is not inline/background; using inline"
                ));
                NotifyMode::default()
            }),
        };
        Self::new(dir)
            .with_notifier(Arc::new(TelegramNotifier::from_config(config)))
            .with_notify_mode(notify_mode)
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notify>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn with_notify_mode(mut self, mode: NotifyMode) -> Self {
        self.notify_mode = mode;
        self
    }

    #[must_use]
    pub fn with_mirror<W: Write + Send + 'static>(mut self, mirror: W) -> Self {
        self.mirror = Some(Box::new(mirror));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn defaults_from_empty_config() {
        let opts = LoggerOptions::from_config(&Config::empty());
        assert_eq!(opts.dir, Path::new("logs"));
        assert_eq!(opts.notify_mode, NotifyMode::Inline);
        assert!(opts.mirror.is_none());
    }

    #[test]
    fn reads_directory_and_mode() {
        let cfg = Config::parse("LOG_DIRECTORY=/var/log/app\nLOG_NOTIFY_MODE=background\n");
        let opts = LoggerOptions::from_config(&cfg);
        assert_eq!(opts.dir, Path::new("/var/log/app"));
        assert_eq!(opts.notify_mode, NotifyMode::Background);
    }

    #[test]
    fn logging_section_overrides_globals() {
        let cfg = Config::parse("[Logging]\nLOG_DIRECTORY=/srv/logs\n")
            .with_global("LOG_DIRECTORY", "/tmp/ignored")
            .with_global("LOG_NOTIFY_MODE", "background");
        let opts = LoggerOptions::from_config(&cfg);
        assert_eq!(opts.dir, Path::new("/srv/logs"));
        assert_eq!(opts.notify_mode, NotifyMode::Background);
    }

    #[test]
    fn bad_mode_falls_back_to_inline() {
        let cfg = Config::parse("LOG_NOTIFY_MODE=whenever\n");
        assert_eq!(LoggerOptions::from_config(&cfg).notify_mode, NotifyMode::Inline);
    }
}
