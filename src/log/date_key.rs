use chrono::NaiveDate;
use std::fmt;

/// Calendar day used to partition log files.
///
/// Rendered as `YYYY-MM-DD`, both inside log lines and as the file stem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns `None` for an impossible calendar date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// The following calendar day (saturates at the end of chrono's range).
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }

    /// File name of this day's log, e.g. `2024-01-01.log`.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{self}.log")
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn renders_zero_padded() {
        let d = DateKey::from_ymd(2024, 1, 5).unwrap();
        assert_eq!(d.to_string(), "2024-01-05");
        assert_eq!(d.file_name(), "2024-01-05.log");
    }

    #[test]
    fn next_crosses_month_and_year() {
        let d = DateKey::from_ymd(2023, 12, 31).unwrap();
        assert_eq!(d.next(), DateKey::from_ymd(2024, 1, 1).unwrap());
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(DateKey::from_ymd(2023, 2, 29).is_none());
    }
}
