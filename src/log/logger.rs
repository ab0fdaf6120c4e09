use crate::{
    config::Config,
    log::{
        date_key::DateKey,
        diagnostics,
        file_sink::FileSink,
        log_error::LogError,
        log_level::LogLevel,
        log_sink::LogSink,
        logger_handle::{LoggerHandle, Shared},
        logger_options::LoggerOptions,
        worker::{Command, Worker},
    },
    notify::NotifyDispatcher,
};

use std::{
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, atomic::AtomicBool, mpsc},
    thread::{self, JoinHandle},
};

/// Asynchronous, day-partitioned logger.
///
/// # Architecture
///
/// 1. **Producers**: any thread calls [`Logger::log`] or a cloned [`LoggerHandle`].
/// 2. **Queue**: an unbounded `mpsc` channel of formatted lines (strict FIFO, no drops).
/// 3. **Consumer**: the `logger-worker` thread writes each line to stdout and
///    to `<dir>/<YYYY-MM-DD>.log`, flushing after every line and rotating
///    when a record's day differs from the open file's.
/// 4. **Notifications**: `Error` records are also handed to the configured
///    notifier, inline or on a `notifier-worker` thread.
///
/// The queue has no upper bound: a producer that outpaces the disk grows
/// memory without limit.
///
/// Dropping the logger stops it (see [`Logger::stop`]).
pub struct Logger {
    handle: LoggerHandle,
    worker: Mutex<Option<JoinHandle<u64>>>,
    dir: PathBuf,
}

impl Logger {
    /// Starts a logger writing into `dir` with default collaborators.
    ///
    /// # Errors
    ///
    /// See [`Logger::start`].
    pub fn start_in_dir<D: AsRef<Path>>(dir: D) -> Result<Self, LogError> {
        Self::start(LoggerOptions::new(dir.as_ref()))
    }

    /// Starts a logger configured from settings (`LOG_DIRECTORY`,
    /// `LOG_NOTIFY_MODE`, `TELEGRAM_*`).
    ///
    /// # Errors
    ///
    /// See [`Logger::start`].
    pub fn from_config(config: &Config) -> Result<Self, LogError> {
        Self::start(LoggerOptions::from_config(config))
    }

    /// Creates the log directory, opens today's file and spawns the worker.
    ///
    /// Directory and file failures are reported and retried per record; they
    /// do not fail startup.
    ///
    /// # Errors
    ///
    /// [`LogError::Spawn`] if a worker thread cannot be spawned.
    pub fn start(options: LoggerOptions) -> Result<Self, LogError> {
        let LoggerOptions {
            dir,
            clock,
            notifier,
            notify_mode,
            mirror,
        } = options;

        let mut sink = FileSink::new(&dir);
        if let Err(e) = sink.rotate_to(clock.today()) {
            diagnostics::report(format_args!("{e}"));
        }

        let mirror = mirror.unwrap_or_else(|| Box::new(io::stdout()));
        let notify = NotifyDispatcher::start(notify_mode, notifier).map_err(LogError::Spawn)?;

        let (tx, rx) = mpsc::channel::<Command>();
        let worker = thread::Builder::new()
            .name("logger-worker".into())
            .spawn(move || Worker::new(rx, sink, mirror).run())
            .map_err(LogError::Spawn)?;

        let shared = Shared {
            tx,
            clock,
            notify,
            stopped: AtomicBool::new(false),
        };

        Ok(Self {
            handle: LoggerHandle {
                shared: Arc::new(shared),
            },
            worker: Mutex::new(Some(worker)),
            dir,
        })
    }

    /// Enqueues one record. Never blocks on file or stdout I/O.
    ///
    /// For `Error` records in inline notify mode, the notification is sent
    /// synchronously on this thread before returning; this is the only way
    /// `log` can stall, for at most the notifier's timeouts.
    pub fn log<S: Into<String>>(&self, level: LogLevel, text: S) {
        self.handle.log(level, text);
    }

    pub fn info<S: Into<String>>(&self, text: S) {
        self.handle.info(text);
    }

    pub fn warning<S: Into<String>>(&self, text: S) {
        self.handle.warning(text);
    }

    pub fn error<S: Into<String>>(&self, text: S) {
        self.handle.error(text);
    }

    /// Waits until everything logged so far is on disk and on stdout.
    pub fn flush(&self) {
        self.handle.flush();
    }

    /// Returns a cloneable producer handle.
    #[must_use]
    pub fn handle(&self) -> LoggerHandle {
        self.handle.clone()
    }

    #[must_use]
    pub fn log_dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `day`'s records.
    #[must_use]
    pub fn file_path_for(&self, day: DateKey) -> PathBuf {
        self.dir.join(day.file_name())
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.handle.is_stopped()
    }

    /// Stops accepting records, drains the queue, closes the file and joins
    /// the worker (and the notifier thread, if any).
    ///
    /// Idempotent. A concurrent caller waits for the first stop to finish;
    /// later calls return immediately.
    pub fn stop(&self) {
        let mut worker = self.worker.lock().unwrap_or_else(|e| e.into_inner());
        let Some(handle) = worker.take() else {
            return;
        };

        let shared = &self.handle.shared;
        shared
            .stopped
            .store(true, std::sync::atomic::Ordering::Release);
        let _ = shared.tx.send(Command::Shutdown);
        if handle.join().is_err() {
            diagnostics::report(format_args!("logger worker panicked"));
        }
        shared.notify.shutdown();
    }
}

impl LogSink for Logger {
    #[inline]
    fn log(&self, level: LogLevel, msg: &str) {
        self.handle.log(level, msg);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.stop();
    }
}
