use crate::{
    log::{
        clock::Clock,
        diagnostics,
        log_error::LogError,
        log_level::LogLevel,
        log_record::{LogRecord, QueuedLine},
        log_sink::LogSink,
        worker::Command,
    },
    notify::NotifyDispatcher,
};

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    mpsc,
};

/// State shared by the `Logger` and all of its handles.
pub(crate) struct Shared {
    pub(crate) tx: mpsc::Sender<Command>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) notify: NotifyDispatcher,
    pub(crate) stopped: AtomicBool,
}

/// Lightweight, cloneable producer side of a [`Logger`](super::logger::Logger).
///
/// Logging never touches the file or stdout: the record is formatted and
/// pushed on an unbounded queue. The one exception is `Error` records with
/// [`NotifyMode::Inline`](crate::notify::NotifyMode::Inline), where the
/// notification runs on the calling thread before `log` returns.
///
/// # Examples
/// ```ignore
/// let handle = logger.handle();
/// std::thread::spawn(move || handle.log(LogLevel::Info, "from a worker"));
/// ```
#[derive(Clone)]
pub struct LoggerHandle {
    pub(crate) shared: Arc<Shared>,
}

impl LoggerHandle {
    /// Stamps, formats and enqueues one record, then dispatches the
    /// notification for `Error` records.
    ///
    /// # Errors
    ///
    /// [`LogError::Stopped`] once the logger has been stopped; the record is
    /// not written.
    pub fn try_log<S: Into<String>>(&self, level: LogLevel, text: S) -> Result<(), LogError> {
        if self.shared.stopped.load(Ordering::Acquire) {
            return Err(LogError::Stopped);
        }

        let record = LogRecord::new(self.shared.clock.today(), level, text);
        self.shared
            .tx
            .send(Command::Record(QueuedLine::from(&record)))
            .map_err(|_| LogError::Stopped)?;

        if level.notifies() {
            self.shared.notify.dispatch(&record.message);
        }
        Ok(())
    }

    /// Like [`try_log`](Self::try_log), but failures are reported on stderr
    /// instead of returned.
    pub fn log<S: Into<String>>(&self, level: LogLevel, text: S) {
        let text = text.into();
        if let Err(e) = self.try_log(level, text.as_str()) {
            diagnostics::report(format_args!("{e}; dropped [{level}] {text}"));
        }
    }

    pub fn info<S: Into<String>>(&self, text: S) {
        self.log(LogLevel::Info, text);
    }

    pub fn warning<S: Into<String>>(&self, text: S) {
        self.log(LogLevel::Warning, text);
    }

    pub fn error<S: Into<String>>(&self, text: S) {
        self.log(LogLevel::Error, text);
    }

    /// Blocks until every record enqueued before this call has been written
    /// and flushed. Returns immediately once the logger has stopped.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = mpsc::channel();
        if self.shared.tx.send(Command::Flush(ack_tx)).is_ok() {
            // Err means the worker exited; nothing left to wait for.
            let _ = ack_rx.recv();
        }
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::Acquire)
    }
}

impl LogSink for LoggerHandle {
    #[inline]
    fn log(&self, level: LogLevel, msg: &str) {
        LoggerHandle::log(self, level, msg);
    }
}
