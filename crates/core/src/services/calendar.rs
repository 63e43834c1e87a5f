use chrono::{DateTime, Datelike, LocalResult, Months, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::CoreError;

/// Civil calendar of a fixed time zone.
///
/// Day and month boundaries used for interval expansion and for axis ticks
/// both come from here, so they always agree. Timestamps are Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    tz: Tz,
}

impl Calendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Local calendar date containing `ts`.
    pub fn date_of(&self, ts: i64) -> Result<NaiveDate, CoreError> {
        Ok(self.to_local(ts)?.date_naive())
    }

    /// Timestamp of local midnight starting the day that contains `ts`.
    pub fn start_of_day(&self, ts: i64) -> Result<i64, CoreError> {
        let date = self.date_of(ts)?;
        self.midnight(date)
    }

    /// Smallest day boundary that is `>= ts`.
    pub fn ceil_day(&self, ts: i64) -> Result<i64, CoreError> {
        let start = self.start_of_day(ts)?;
        if start == ts {
            return Ok(start);
        }
        self.add_days(start, 1)
    }

    /// Midnight `days` calendar days after the day containing `day_ts`.
    pub fn add_days(&self, day_ts: i64, days: u64) -> Result<i64, CoreError> {
        let date = self.date_of(day_ts)?;
        let next = date
            .checked_add_days(chrono::Days::new(days))
            .ok_or_else(|| out_of_range(day_ts))?;
        self.midnight(next)
    }

    /// Midnight on the first day of the month containing `ts`.
    pub fn start_of_month(&self, ts: i64) -> Result<i64, CoreError> {
        let date = self.date_of(ts)?;
        let first = date.with_day0(0).ok_or_else(|| out_of_range(ts))?;
        self.midnight(first)
    }

    /// Midnight on the first day of the month after the one containing `ts`.
    pub fn next_month(&self, ts: i64) -> Result<i64, CoreError> {
        let first = self.date_of(self.start_of_month(ts)?)?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| out_of_range(ts))?;
        self.midnight(next)
    }

    /// Format `ts` in local time with a `chrono` format string.
    pub fn format(&self, ts: i64, fmt: &str) -> Result<String, CoreError> {
        Ok(self.to_local(ts)?.format(fmt).to_string())
    }

    fn to_local(&self, ts: i64) -> Result<DateTime<Tz>, CoreError> {
        DateTime::<Utc>::from_timestamp(ts, 0)
            .map(|dt| dt.with_timezone(&self.tz))
            .ok_or_else(|| out_of_range(ts))
    }

    /// First instant of `date` in local time.
    fn midnight(&self, date: NaiveDate) -> Result<i64, CoreError> {
        let naive = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            CoreError::ValidationError(format!("no midnight for date {date}"))
        })?;
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(dt.timestamp()),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.timestamp()),
            // Midnight skipped by a DST jump: the day starts when the clock lands.
            LocalResult::None => {
                let shifted = naive + chrono::Duration::hours(1);
                self.tz
                    .from_local_datetime(&shifted)
                    .earliest()
                    .map(|dt| dt.timestamp())
                    .ok_or_else(|| {
                        CoreError::ValidationError(format!(
                            "date {date} has no start in {}",
                            self.tz.name()
                        ))
                    })
            }
        }
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(chrono_tz::Atlantic::Reykjavik)
    }
}

fn out_of_range(ts: i64) -> CoreError {
    CoreError::ValidationError(format!("timestamp {ts} is out of range"))
}

