use crate::log::date_key::DateKey;
use std::sync::{Arc, Mutex};

/// Source of "today" for stamping and rotating log files.
pub trait Clock: Send + Sync {
    fn today(&self) -> DateKey;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateKey {
        DateKey::new(chrono::Local::now().date_naive())
    }
}

/// Manually driven clock, for simulating day changes.
///
/// Clones share the same date, so a test can keep one clone and hand the
/// other to the logger.
#[derive(Debug, Clone)]
pub struct ManualClock {
    day: Arc<Mutex<DateKey>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(day: DateKey) -> Self {
        Self {
            day: Arc::new(Mutex::new(day)),
        }
    }

    pub fn set(&self, day: DateKey) {
        *self.day.lock().unwrap_or_else(|e| e.into_inner()) = day;
    }

    /// Moves the clock one day forward and returns the new day.
    pub fn advance(&self) -> DateKey {
        let mut guard = self.day.lock().unwrap_or_else(|e| e.into_inner());
        *guard = guard.next();
        *guard
    }
}

impl Clock for ManualClock {
    fn today(&self) -> DateKey {
        *self.day.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn manual_clock_clones_share_state() {
        let clock = ManualClock::new(DateKey::from_ymd(2024, 1, 1).unwrap());
        let other = clock.clone();
        assert_eq!(other.advance(), DateKey::from_ymd(2024, 1, 2).unwrap());
        assert_eq!(clock.today(), DateKey::from_ymd(2024, 1, 2).unwrap());
        clock.set(DateKey::from_ymd(2025, 6, 30).unwrap());
        assert_eq!(other.today().to_string(), "2025-06-30");
    }

    #[test]
    fn system_clock_matches_chrono_local() {
        let before = chrono::Local::now().date_naive();
        let today = SystemClock.today().date();
        let after = chrono::Local::now().date_naive();
        assert!(today == before || today == after);
    }
}
