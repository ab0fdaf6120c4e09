use crate::log::{date_key::DateKey, diagnostics, log_error::LogError};

use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// The on-disk side of the logger: one append-mode file per calendar day.
///
/// Owned by the worker thread only, so it needs no locking. At most one
/// handle is open at a time and it always belongs to `current_day`.
pub struct FileSink {
    dir: PathBuf,
    current_day: Option<DateKey>,
    out: Option<BufWriter<File>>,
}

impl FileSink {
    /// Creates the sink for `dir`, creating the directory if it is missing.
    ///
    /// A failure to create the directory is reported, not returned: the open
    /// for the first record will fail and report again, and later records
    /// retry.
    pub fn new<D: AsRef<Path>>(dir: D) -> Self {
        let dir = dir.as_ref().to_path_buf();
        if let Err(source) = fs::create_dir_all(&dir) {
            let err = LogError::CreateDir {
                path: dir.clone(),
                source,
            };
            diagnostics::report(format_args!("{err}"));
        }
        Self {
            dir,
            current_day: None,
            out: None,
        }
    }

    /// Path of the file that holds `day`'s records.
    #[must_use]
    pub fn path_for(&self, day: DateKey) -> PathBuf {
        self.dir.join(day.file_name())
    }

    #[must_use]
    pub fn current_day(&self) -> Option<DateKey> {
        self.current_day
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.out.is_some()
    }

    /// Makes sure the open handle belongs to `day`.
    ///
    /// `day` is the date stamped on the record when it was logged, not the
    /// date at write time, so a line always lands in the file its date names.
    ///
    /// On a day change the previous handle is flushed and closed before the
    /// new file is opened. If the previous open failed, the open is retried.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Open`] if the day's file cannot be opened; the sink
    /// is then left with no handle.
    pub fn rotate_to(&mut self, day: DateKey) -> Result<(), LogError> {
        if self.current_day == Some(day) && self.out.is_some() {
            return Ok(());
        }

        self.close();
        self.current_day = Some(day);

        let path = self.path_for(day);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::Open { path, source })?;
        self.out = Some(BufWriter::new(file));
        Ok(())
    }

    /// Appends `line` to the current file and flushes it.
    ///
    /// Does nothing when no file is open (the open failure was already
    /// reported by [`FileSink::rotate_to`]).
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Write`] if the write or the flush fails.
    pub fn write_line(&mut self, line: &str) -> Result<(), LogError> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        let res = out.write_all(line.as_bytes()).and_then(|()| out.flush());
        res.map_err(|source| LogError::Write {
            path: self.current_day.map_or_else(|| self.dir.clone(), |d| self.path_for(d)),
            source,
        })
    }

    /// Flushes and drops the current handle, if any.
    pub fn close(&mut self) {
        if let Some(mut out) = self.out.take() {
            if let Err(source) = out.flush() {
                let err = LogError::Write {
                    path: self
                        .current_day
                        .map_or_else(|| self.dir.clone(), |d| self.path_for(d)),
                    source,
                };
                diagnostics::report(format_args!("{err}"));
            }
        }
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        self.close();
    }
}
