//! Trailing window selection over complete calendar months

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Half-open date interval `[start, end)` covering the last N complete
/// calendar months before an evaluation date. The current in-progress month
/// is never included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailingWindow {
    /// First day inside the window
    pub start: NaiveDate,

    /// First day after the window (first day of the evaluation month)
    pub end: NaiveDate,

    /// Window length in whole months
    pub months: u32,
}

impl TrailingWindow {
    /// Build the window ending at the first day of the evaluation month.
    /// `months <= 0` is clamped to 1.
    pub fn trailing(eval_date: NaiveDate, months: u32) -> Self {
        if months == 0 {
            log::warn!("window length 0 clamped to 1 month");
        }
        let months = months.max(1);
        let end = first_day_of_month(eval_date);
        // end is a first-of-month, so subtracting whole months cannot fail
        let start = end
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);

        Self { start, end, months }
    }

    /// Whether a record date falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// First day of the month containing `date`
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let window = TrailingWindow::trailing(date(2025, 3, 15), 6);
        assert_eq!(window.start, date(2024, 9, 1));
        assert_eq!(window.end, date(2025, 3, 1));
        assert_eq!(window.months, 6);
    }

    #[test]
    fn test_window_membership() {
        let window = TrailingWindow::trailing(date(2025, 3, 15), 6);

        // Day before the window opens
        assert!(!window.contains(date(2024, 8, 31)));
        // First day in
        assert!(window.contains(date(2024, 9, 1)));
        // Last complete month is included
        assert!(window.contains(date(2025, 2, 28)));
        // The evaluation month itself is excluded
        assert!(!window.contains(date(2025, 3, 1)));
        assert!(!window.contains(date(2025, 3, 15)));
    }

    #[test]
    fn test_zero_months_clamped() {
        let window = TrailingWindow::trailing(date(2025, 3, 15), 0);
        assert_eq!(window.months, 1);
        assert_eq!(window.start, date(2025, 2, 1));
        assert_eq!(window.end, date(2025, 3, 1));
    }

    #[test]
    fn test_window_crossing_year_boundary() {
        let window = TrailingWindow::trailing(date(2025, 1, 2), 3);
        assert_eq!(window.start, date(2024, 10, 1));
        assert_eq!(window.end, date(2025, 1, 1));
        assert!(window.contains(date(2024, 12, 31)));
    }
}
