//! The single consumer of the log queue.
//!
//! Producers push [`Command`]s into an unbounded `mpsc` channel; this thread
//! pops them in order and performs every write. Holding no lock while
//! writing, it is the only code that touches the [`FileSink`].

use crate::log::{diagnostics, file_sink::FileSink, log_error::LogError, log_record::QueuedLine};

use std::{
    io::Write,
    sync::mpsc::{self, Receiver, TryRecvError},
};

/// Messages understood by the worker.
#[derive(Debug)]
pub enum Command {
    /// A formatted record to write.
    Record(QueuedLine),
    /// Barrier: acknowledged once every earlier command has been written.
    Flush(mpsc::Sender<()>),
    /// Drain whatever is queued, then exit.
    Shutdown,
}

/// Life cycle of the worker loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    /// Blocked until a command arrives.
    Waiting,
    /// Writing queued records until the channel is momentarily empty.
    Draining,
    /// Shutdown requested; writing the rest of the queue before exiting.
    Stopping,
    /// Terminal.
    Stopped,
}

/// What handling one command asks of the loop.
enum Step {
    Continue,
    Shutdown,
}

pub struct Worker {
    rx: Receiver<Command>,
    sink: FileSink,
    mirror: Box<dyn Write + Send>,
    state: WorkerState,
    written: u64,
}

impl Worker {
    pub fn new(rx: Receiver<Command>, sink: FileSink, mirror: Box<dyn Write + Send>) -> Self {
        Self {
            rx,
            sink,
            mirror,
            state: WorkerState::Waiting,
            written: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Number of records written so far.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Runs until a shutdown command has been seen and the queue is empty,
    /// or until every sender is gone. Returns the number of records written.
    pub fn run(mut self) -> u64 {
        while self.state != WorkerState::Stopped {
            self.state = self.step();
        }
        self.sink.close();
        let _ = self.mirror.flush();
        self.written
    }

    fn step(&mut self) -> WorkerState {
        match self.state {
            WorkerState::Waiting => match self.rx.recv() {
                Ok(cmd) => self.after(cmd, WorkerState::Draining),
                Err(_) => WorkerState::Stopped,
            },
            WorkerState::Draining => match self.rx.try_recv() {
                Ok(cmd) => self.after(cmd, WorkerState::Draining),
                Err(TryRecvError::Empty) => WorkerState::Waiting,
                Err(TryRecvError::Disconnected) => WorkerState::Stopped,
            },
            WorkerState::Stopping => match self.rx.try_recv() {
                Ok(cmd) => {
                    self.handle(cmd);
                    WorkerState::Stopping
                }
                Err(_) => WorkerState::Stopped,
            },
            WorkerState::Stopped => WorkerState::Stopped,
        }
    }

    fn after(&mut self, cmd: Command, next: WorkerState) -> WorkerState {
        match self.handle(cmd) {
            Step::Continue => next,
            Step::Shutdown => WorkerState::Stopping,
        }
    }

    fn handle(&mut self, cmd: Command) -> Step {
        match cmd {
            Command::Record(q) => {
                self.write(&q);
                Step::Continue
            }
            Command::Flush(ack) => {
                let _ = self.mirror.flush();
                let _ = ack.send(());
                Step::Continue
            }
            Command::Shutdown => Step::Shutdown,
        }
    }

    /// Rotation check, then stdout, then file. A failing sink never stops
    /// the other one.
    fn write(&mut self, q: &QueuedLine) {
        if let Err(e) = self.sink.rotate_to(q.day) {
            diagnostics::report(format_args!("{e}"));
        }

        let mirrored = self
            .mirror
            .write_all(q.line.as_bytes())
            .and_then(|()| self.mirror.flush());
        if let Err(e) = mirrored {
            diagnostics::report(format_args!("{}", LogError::Stdout(e)));
        }

        if let Err(e) = self.sink.write_line(&q.line) {
            diagnostics::report(format_args!("{e}"));
        }
        self.written += 1;
    }
}
