use crate::errors::CoreError;
use crate::models::chart::DaySnapshot;
use crate::services::calendar::Calendar;

/// Computes x-axis ticks: one per month boundary across the series.
pub struct TickService {
    calendar: Calendar,
}

impl TickService {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }

    /// First-of-month timestamps from the month of the earliest snapshot up to
    /// the last month boundary strictly before the latest snapshot.
    ///
    /// The first tick is always present, even if it is not before the latest
    /// snapshot (single point, or everything within one month).
    /// Does not assume the input is sorted.
    pub fn month_ticks(&self, snapshots: &[DaySnapshot]) -> Result<Vec<i64>, CoreError> {
        let first = snapshots.first().ok_or(CoreError::EmptySeries)?;
        let (min, max) = snapshots
            .iter()
            .fold((first.timestamp, first.timestamp), |(lo, hi), s| {
                (lo.min(s.timestamp), hi.max(s.timestamp))
            });

        let mut ticks = vec![self.calendar.start_of_month(min)?];
        let mut next = self.calendar.next_month(min)?;
        while next < max {
            ticks.push(next);
            next = self.calendar.next_month(next)?;
        }

        tracing::debug!(ticks = ticks.len(), min, max, "generated month ticks");
        Ok(ticks)
    }
}

impl Default for TickService {
    fn default() -> Self {
        Self::new(Calendar::default())
    }
}
