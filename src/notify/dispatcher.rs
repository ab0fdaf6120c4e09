use crate::{log::diagnostics, notify::Notify};

use std::{
    io,
    sync::{
        Arc, Mutex,
        mpsc::{self, Sender},
    },
    thread::{self, JoinHandle},
};

/// Where error notifications run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotifyMode {
    /// On the thread that called `log()`. That caller blocks for the
    /// duration of the network call (bounded by the client timeouts).
    #[default]
    Inline,
    /// On a dedicated `notifier-worker` thread; `log()` only enqueues.
    Background,
}

impl NotifyMode {
    /// Parses `inline` / `background` (case-insensitive).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inline" | "sync" => Some(Self::Inline),
            "background" | "async" => Some(Self::Background),
            _ => None,
        }
    }
}

enum Route {
    Inline(Arc<dyn Notify>),
    Background {
        tx: Mutex<Option<Sender<String>>>,
        thread: Mutex<Option<JoinHandle<()>>>,
    },
}

/// Routes error messages to a [`Notify`] implementation, either inline or
/// through a background thread with its own unbounded queue.
pub struct NotifyDispatcher {
    route: Route,
}

impl NotifyDispatcher {
    #[must_use]
    pub fn inline(notifier: Arc<dyn Notify>) -> Self {
        Self {
            route: Route::Inline(notifier),
        }
    }

    /// Spawns the `notifier-worker` thread.
    ///
    /// # Errors
    ///
    /// Returns the `io::Error` from `thread::Builder::spawn`.
    pub fn background(notifier: Arc<dyn Notify>) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<String>();
        let thread = thread::Builder::new()
            .name("notifier-worker".into())
            .spawn(move || {
                // Ends once every sender is dropped and the queue is empty.
                while let Ok(message) = rx.recv() {
                    notifier.send(&message);
                }
            })?;
        Ok(Self {
            route: Route::Background {
                tx: Mutex::new(Some(tx)),
                thread: Mutex::new(Some(thread)),
            },
        })
    }

    /// # Errors
    ///
    /// See [`NotifyDispatcher::background`].
    pub fn start(mode: NotifyMode, notifier: Arc<dyn Notify>) -> io::Result<Self> {
        match mode {
            NotifyMode::Inline => Ok(Self::inline(notifier)),
            NotifyMode::Background => Self::background(notifier),
        }
    }

    #[must_use]
    pub fn mode(&self) -> NotifyMode {
        match self.route {
            Route::Inline(_) => NotifyMode::Inline,
            Route::Background { .. } => NotifyMode::Background,
        }
    }

    pub fn dispatch(&self, message: &str) {
        match &self.route {
            Route::Inline(notifier) => notifier.send(message),
            Route::Background { tx, .. } => {
                let guard = tx.lock().unwrap_or_else(|e| e.into_inner());
                let sent = guard
                    .as_ref()
                    .is_some_and(|tx| tx.send(message.to_string()).is_ok());
                if !sent {
                    diagnostics::report(format_args!(
                        "notifier stopped; dropping notification"
                    ));
                }
            }
        }
    }

    /// Closes the background queue and waits for pending notifications.
    /// Idempotent; a no-op for inline dispatch.
    pub fn shutdown(&self) {
        if let Route::Background { tx, thread } = &self.route {
            drop(tx.lock().unwrap_or_else(|e| e.into_inner()).take());
            let handle = thread.lock().unwrap_or_else(|e| e.into_inner()).take();
            if let Some(handle) = handle {
                if handle.join().is_err() {
                    diagnostics::report(format_args!("notifier worker panicked"));
                }
            }
        }
    }
}

impl Drop for NotifyDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::thread::ThreadId;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(String, ThreadId)>>,
    }

    impl Notify for Recorder {
        fn send(&self, message: &str) {
            self.seen
                .lock()
                .unwrap()
                .push((message.to_string(), thread::current().id()));
        }
    }

    #[test]
    fn parses_modes() {
        assert_eq!(NotifyMode::parse("Inline"), Some(NotifyMode::Inline));
        assert_eq!(NotifyMode::parse(" background "), Some(NotifyMode::Background));
        assert_eq!(NotifyMode::parse("later"), None);
        assert_eq!(NotifyMode::default(), NotifyMode::Inline);
    }

    #[test]
    fn inline_runs_on_caller_thread() {
        let rec = Arc::new(Recorder::default());
        let d = NotifyDispatcher::inline(rec.clone());
        d.dispatch("boom");
        d.shutdown();

        let seen = rec.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "boom");
        assert_eq!(seen[0].1, thread::current().id());
    }

    #[test]
    fn background_runs_elsewhere_and_drains_on_shutdown() {
        let rec = Arc::new(Recorder::default());
        let d = NotifyDispatcher::start(NotifyMode::Background, rec.clone()).unwrap();
        assert_eq!(d.mode(), NotifyMode::Background);
        for i in 0..20 {
            d.dispatch(&format!("e{i}"));
        }
        d.shutdown();
        d.shutdown();

        let seen = rec.seen.lock().unwrap();
        let msgs: Vec<_> = seen.iter().map(|(m, _)| m.clone()).collect();
        let expected: Vec<_> = (0..20).map(|i| format!("e{i}")).collect();
        assert_eq!(msgs, expected);
        assert!(seen.iter().all(|(_, id)| *id != thread::current().id()));
    }

    #[test]
    fn dispatch_after_shutdown_is_dropped() {
        let rec = Arc::new(Recorder::default());
        let d = NotifyDispatcher::background(rec.clone()).unwrap();
        d.shutdown();
        d.dispatch("late");
        assert!(rec.seen.lock().unwrap().is_empty());
    }
}
