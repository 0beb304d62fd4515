//! Calendar for the simulated company timeline
//!
//! The clock runs an hour-of-day dial; every time the dial wraps past 24
//! the calendar advances by one reporting period (one week by default).
//! Scenario events and weather are keyed on the month and year of the
//! resulting date.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Start of the company timeline
pub fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Calendar tracks the hour dial and the number of elapsed reporting periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    /// 0.0 up to (not including) 24.0
    hour_of_day: f64,
    /// Number of dial wraps since the epoch
    day_count: u32,
    epoch: NaiveDate,
    days_per_rollover: u32,
}

impl Calendar {
    pub fn new(epoch: NaiveDate, start_hour: f64, days_per_rollover: u32) -> Self {
        Self {
            hour_of_day: start_hour.rem_euclid(24.0),
            day_count: 0,
            epoch,
            days_per_rollover: days_per_rollover.max(1),
        }
    }

    /// Advance the dial. Returns true when the dial wrapped into a new period.
    pub fn advance(&mut self, hours: f64) -> bool {
        self.hour_of_day += hours.max(0.0);
        if self.hour_of_day >= 24.0 {
            self.hour_of_day = 0.0;
            self.day_count += 1;
            true
        } else {
            false
        }
    }

    pub fn hour_of_day(&self) -> f64 {
        self.hour_of_day
    }

    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    pub fn date(&self) -> NaiveDate {
        let days = i64::from(self.day_count) * i64::from(self.days_per_rollover);
        self.epoch
            .checked_add_signed(Duration::days(days))
            .unwrap_or(NaiveDate::MAX)
    }

    /// 1-based month of the current date
    pub fn month(&self) -> u32 {
        self.date().month()
    }

    pub fn year(&self) -> i32 {
        self.date().year()
    }

    /// Display string such as "Jan 2000"
    pub fn display(&self) -> String {
        self.date().format("%b %Y").to_string()
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(default_epoch(), 8.0, 7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_starts_in_january_2000() {
        let cal = Calendar::default();
        assert_eq!(cal.display(), "Jan 2000");
        assert_eq!(cal.month(), 1);
        assert_eq!(cal.year(), 2000);
        assert_eq!(cal.day_count(), 0);
    }

    #[test]
    fn test_calendar_wraps_dial() {
        let mut cal = Calendar::new(default_epoch(), 23.0, 7);
        assert!(!cal.advance(0.5));
        assert!(cal.advance(0.5));
        assert_eq!(cal.hour_of_day(), 0.0);
        assert_eq!(cal.day_count(), 1);
        assert_eq!(cal.date(), NaiveDate::from_ymd_opt(2000, 1, 8).unwrap());
    }

    #[test]
    fn test_calendar_weekly_rollover_reaches_may() {
        let mut cal = Calendar::new(default_epoch(), 0.0, 7);
        // 18 weeks after Jan 1 2000 is May 6 2000
        for _ in 0..18 {
            while !cal.advance(1.0) {}
        }
        assert_eq!(cal.month(), 5);
        assert_eq!(cal.display(), "May 2000");
    }
}
