use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::chart::DaySnapshot;
use crate::models::price::{PriceInterval, PriceKind};
use crate::models::query::PriceResponse;
use crate::models::series::{SeriesBatch, SeriesSelector};
use crate::models::vendor::VendorDirectory;
use crate::services::calendar::Calendar;

/// Expands interval price records into daily points and merges every series
/// into one timeline of `DaySnapshot`s.
///
/// Pure business logic, no I/O. Each call starts from an empty timeline.
pub struct MergeService {
    calendar: Calendar,
}

impl MergeService {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }

    /// Days covered by one interval, ascending.
    ///
    /// Runs from the start of `start`'s day up to, but not including, the
    /// first day boundary at or after `end`. The start day is always emitted,
    /// so an interval with `start == end` yields exactly one day.
    pub fn expand_days(&self, interval: &PriceInterval) -> Result<Vec<i64>, CoreError> {
        let start_day = self.calendar.start_of_day(interval.start)?;
        let end_day = self.calendar.ceil_day(interval.end)?;

        let mut days = vec![start_day];
        let mut next_day = self.calendar.add_days(start_day, 1)?;
        while next_day < end_day {
            days.push(next_day);
            next_day = self.calendar.add_days(next_day, 1)?;
        }
        Ok(days)
    }

    /// Merge all batches into a timeline sorted by timestamp.
    ///
    /// Batches are applied in order, intervals within a batch in order, and
    /// days ascending. A later write to the same (day, series key) replaces the
    /// earlier one; other keys on that day are left alone.
    ///
    /// Every interval is validated first: a single `start > end` rejects the
    /// whole input and nothing is merged.
    pub fn merge(&self, batches: &[SeriesBatch]) -> Result<Vec<DaySnapshot>, CoreError> {
        let keyed: Vec<(String, &[PriceInterval])> = batches
            .iter()
            .map(|b| (b.selector.series_key(), b.intervals.as_slice()))
            .collect();

        for (key, intervals) in &keyed {
            for interval in intervals.iter() {
                interval.validate(key)?;
            }
        }

        let mut timeline: BTreeMap<i64, DaySnapshot> = BTreeMap::new();
        for (key, intervals) in &keyed {
            for interval in intervals.iter() {
                for day in self.expand_days(interval)? {
                    timeline
                        .entry(day)
                        .or_insert_with(|| DaySnapshot::new(day))
                        .insert(key.as_str(), interval.price);
                }
            }
        }

        tracing::debug!(
            series = keyed.len(),
            days = timeline.len(),
            "merged interval prices into daily timeline"
        );
        Ok(timeline.into_values().collect())
    }

    /// Turn a fetched response into merge batches, resolving vendor ids to names.
    ///
    /// Order: vendors as returned, then products, regular prices before sale
    /// prices. Vendors missing from `vendors` are skipped with a warning since
    /// vendor configuration may lag behind stored prices.
    pub fn batches_from_response(
        &self,
        response: &PriceResponse,
        vendors: &VendorDirectory,
    ) -> Vec<SeriesBatch> {
        let mut batches = Vec::new();
        for vendor_prices in &response.vendors {
            let Some(vendor_name) = vendors.resolve(&vendor_prices.vendor_id) else {
                tracing::warn!(
                    vendor_id = %vendor_prices.vendor_id,
                    "dropping prices for unknown vendor"
                );
                continue;
            };

            for product in &vendor_prices.products {
                batches.push(SeriesBatch::new(
                    SeriesSelector::new(vendor_name, &product.product_code, PriceKind::Regular),
                    product.regular.clone(),
                ));
                if let Some(sale) = &product.sale {
                    batches.push(SeriesBatch::new(
                        SeriesSelector::new(vendor_name, &product.product_code, PriceKind::Sale),
                        sale.clone(),
                    ));
                }
            }
        }
        batches
    }

    /// Resolve vendors and merge in one step.
    pub fn merge_response(
        &self,
        response: &PriceResponse,
        vendors: &VendorDirectory,
    ) -> Result<Vec<DaySnapshot>, CoreError> {
        let batches = self.batches_from_response(response, vendors);
        self.merge(&batches)
    }
}

impl Default for MergeService {
    fn default() -> Self {
        Self::new(Calendar::default())
    }
}
