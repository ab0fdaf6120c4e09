#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use asynclog::{
    log::{DateKey, LoggerOptions, ManualClock},
    notify::Notify,
};
use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
    thread::{self, ThreadId},
};

/// In-memory stdout mirror that also records which threads wrote to it.
#[derive(Clone, Default)]
pub struct Mirror {
    bytes: Arc<Mutex<Vec<u8>>>,
    writers: Arc<Mutex<Vec<ThreadId>>>,
}

impl Mirror {
    pub fn text(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }

    pub fn writer_threads(&self) -> Vec<ThreadId> {
        self.writers.lock().unwrap().clone()
    }
}

impl Write for Mirror {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writers.lock().unwrap().push(thread::current().id());
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Notifier double: remembers each message and the thread that sent it.
#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<(String, ThreadId)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn threads(&self) -> Vec<ThreadId> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

impl Notify for RecordingNotifier {
    fn send(&self, message: &str) {
        self.calls
            .lock()
            .unwrap()
            .push((message.to_string(), thread::current().id()));
    }
}

pub fn day(y: i32, m: u32, d: u32) -> DateKey {
    DateKey::from_ymd(y, m, d).unwrap()
}

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub clock: ManualClock,
    pub mirror: Mirror,
    pub notifier: Arc<RecordingNotifier>,
}

impl Fixture {
    pub fn new(start: DateKey) -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            clock: ManualClock::new(start),
            mirror: Mirror::default(),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub fn options(&self) -> LoggerOptions {
        LoggerOptions::new(self.dir.path())
            .with_clock(Arc::new(self.clock.clone()))
            .with_notifier(self.notifier.clone())
            .with_mirror(self.mirror.clone())
    }

    pub fn read_day(&self, day: DateKey) -> String {
        std::fs::read_to_string(self.dir.path().join(day.file_name())).unwrap_or_default()
    }
}
