//! Reporting periods
//!
//! A period is a closed calendar interval `[start, end]`. An order
//! belongs to a period when its `created_at` falls on a day inside the
//! interval. Containment is calendar-aware, not a raw epoch comparison.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed date interval used to filter orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether a timestamp falls inside the period (inclusive on both ends)
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        let day = ts.date_naive();
        day >= self.start && day <= self.end
    }

    /// Window length in days (a one-day period has length 1)
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Half-open UTC instant range `[start 00:00, day-after-end 00:00)`
    /// for backend range filters
    pub fn utc_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start.and_time(NaiveTime::MIN).and_utc();
        let end = self
            .end
            .succ_opt()
            .unwrap_or(self.end)
            .and_time(NaiveTime::MIN)
            .and_utc();
        (start, end)
    }
}

/// How the comparison window is derived from the current period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    /// Shift the whole window back by its own length
    Previous,
    /// Shift back by exactly 7 days
    LastWeek,
    /// Shift back by one calendar month
    LastMonth,
    /// Shift back by one calendar year
    LastYear,
}

/// Derive an equal-length prior window for a comparison report.
///
/// Calendar shifts clamp the way chrono clamps month-end dates
/// (Mar 31 - 1 month = Feb 28/29), preserving window length as best as
/// calendar arithmetic allows.
pub fn comparison_period(period: &Period, mode: ComparisonMode) -> Period {
    match mode {
        ComparisonMode::Previous => {
            let shift = Duration::days(period.len_days());
            Period::new(period.start - shift, period.end - shift)
        }
        ComparisonMode::LastWeek => {
            let shift = Duration::days(7);
            Period::new(period.start - shift, period.end - shift)
        }
        ComparisonMode::LastMonth => Period::new(
            sub_months(period.start, 1),
            sub_months(period.end, 1),
        ),
        ComparisonMode::LastYear => Period::new(
            sub_months(period.start, 12),
            sub_months(period.end, 12),
        ),
    }
}

fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}
