//! Local failure reporting for the facility itself.
//!
//! The logger cannot log its own failures through the queue, so problems
//! (unreadable settings, file open errors, failed notifications) become one
//! line on stderr. Reporting never fails.

use std::fmt;
use std::io::Write;

/// Prefix on every diagnostic line so they are easy to grep out of stderr.
pub const PREFIX: &str = "(asynclog)";

/// Writes `"(asynclog) <msg>"` to stderr, ignoring write errors.
pub fn report(msg: fmt::Arguments<'_>) {
    let mut err = std::io::stderr().lock();
    let _ = writeln!(err, "{PREFIX} {msg}");
}
