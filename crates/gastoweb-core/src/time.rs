//! Calendar month handling and the injected clock
//!
//! All dashboard math is month-scoped: ranges are half-open
//! `[first_day, first_day_of_next_month)` so date comparisons never
//! need end-of-day handling.

use chrono::{Datelike, Duration, NaiveDate};
use std::sync::Arc;

/// A validated calendar month ("YYYY-MM")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

/// Half-open date range of a month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: NaiveDate,
    /// First day of the following month (exclusive)
    pub end: NaiveDate,
    pub days_in_month: u32,
}

impl Month {
    /// Parse a strict "YYYY-MM" string; rejects anything else
    pub fn parse(value: &str) -> Option<Month> {
        let text = value.trim();
        let (year_text, month_text) = text.split_once('-')?;
        if year_text.len() != 4 || month_text.len() != 2 {
            return None;
        }
        if !year_text.chars().all(|c| c.is_ascii_digit())
            || !month_text.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
        let year: i32 = year_text.parse().ok()?;
        let month: u32 = month_text.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Month { year, month })
    }

    /// The month a date falls in
    pub fn from_date(date: NaiveDate) -> Month {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Shift by whole months, crossing year boundaries as needed
    pub fn add_months(&self, delta: i32) -> Month {
        let zero_based = self.year * 12 + self.month as i32 - 1 + delta;
        Month {
            year: zero_based.div_euclid(12),
            month: (zero_based.rem_euclid(12) + 1) as u32,
        }
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.add_months(1);
        (next.first_day() - self.first_day()).num_days() as u32
    }

    /// Half-open range covering exactly this month
    pub fn range(&self) -> MonthRange {
        MonthRange {
            start: self.first_day(),
            end: self.add_months(1).first_day(),
            days_in_month: self.days_in_month(),
        }
    }

    /// "YYYY-MM" label
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Monday of the ISO week containing `date`
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The day after `date`
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

// ==================== Clock ====================

/// Wall-clock source, injected so live today/week figures are
/// deterministically testable
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system time
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Clock reference type
pub type ClockRef = Arc<dyn Clock>;
