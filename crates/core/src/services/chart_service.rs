use std::collections::HashSet;

use crate::errors::CoreError;
use crate::models::chart::{ChartData, DaySnapshot, LineStyle};
use crate::models::query::PriceResponse;
use crate::models::series::SeriesBatch;
use crate::models::settings::Settings;
use crate::models::vendor::VendorDirectory;
use crate::services::calendar::Calendar;
use crate::services::color_service::ColorService;
use crate::services::format_service::FormatService;
use crate::services::merge_service::MergeService;
use crate::services::tick_service::TickService;

/// Generates chart-ready data sets from fetched interval prices.
///
/// The core computes all the numbers; the frontend only renders.
/// Chart data includes:
/// - The merged daily series
/// - Month ticks for the x axis
/// - One styled line per series key
/// - Rounded axis domains
pub struct ChartService {
    merge_service: MergeService,
    tick_service: TickService,
    color_service: ColorService,
    format_service: FormatService,
}

impl ChartService {
    pub fn new(settings: &Settings) -> Self {
        let calendar = Calendar::new(settings.time_zone);
        Self {
            merge_service: MergeService::new(calendar),
            tick_service: TickService::new(calendar),
            color_service: ColorService::new(),
            format_service: FormatService::new(settings),
        }
    }

    /// Build a chart from a fetched response, resolving vendor names.
    pub fn build_chart(
        &self,
        response: &PriceResponse,
        vendors: &VendorDirectory,
    ) -> Result<ChartData, CoreError> {
        let batches = self.merge_service.batches_from_response(response, vendors);
        self.build_chart_from_batches(&batches)
    }

    /// Build a chart from already-resolved series batches.
    ///
    /// An empty merge result is not an error: it yields `ChartData::empty()`
    /// and tick generation is skipped.
    pub fn build_chart_from_batches(
        &self,
        batches: &[SeriesBatch],
    ) -> Result<ChartData, CoreError> {
        let snapshots = self.merge_service.merge(batches)?;
        if snapshots.is_empty() {
            return Ok(ChartData::empty());
        }

        let ticks = self.tick_service.month_ticks(&snapshots)?;
        let lines = self.lines(&snapshots);
        let y_domain = self.format_service.y_domain(&snapshots);
        let x_domain = self.format_service.x_domain(&snapshots);

        Ok(ChartData {
            snapshots,
            ticks,
            lines,
            y_domain,
            x_domain,
        })
    }

    /// One line per distinct series key, in order of first appearance.
    pub fn lines(&self, snapshots: &[DaySnapshot]) -> Vec<LineStyle> {
        let mut seen = HashSet::new();
        snapshots
            .iter()
            .flat_map(|s| s.keys())
            .filter(|key| seen.insert(*key))
            .map(|key| self.color_service.line_style(key))
            .collect()
    }

    pub fn format_service(&self) -> &FormatService {
        &self.format_service
    }

    pub fn color_service(&self) -> &ColorService {
        &self.color_service
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
