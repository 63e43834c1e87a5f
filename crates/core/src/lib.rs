pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use models::{
    chart::ChartData,
    query::Selection,
    settings::Settings,
    vendor::VendorDirectory,
};
use providers::{
    http::HttpPriceSource,
    traits::{PriceSource, MAX_SUGGESTIONS},
};
use services::chart_service::ChartService;

use errors::CoreError;

/// Outcome of one chart load.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartUpdate {
    /// Fresh data for the most recent selection
    Render(ChartData),
    /// A newer load started while this one was fetching; discard it
    Superseded,
}

/// Main entry point for the Price History core library.
/// Holds the configuration, the vendor lookup, and the price source.
#[must_use]
pub struct PriceHistory {
    settings: Settings,
    vendors: VendorDirectory,
    source: Box<dyn PriceSource>,
    chart_service: ChartService,
    /// Ticket of the most recently started chart load.
    latest_request: AtomicU64,
}

impl std::fmt::Debug for PriceHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceHistory")
            .field("settings", &self.settings)
            .field("vendors", &self.vendors.len())
            .field("source", &self.source.name())
            .field("latest_request", &self.latest_request.load(Ordering::SeqCst))
            .finish()
    }
}

impl PriceHistory {
    /// Create a chart facade over any price source.
    pub fn new(
        settings: Settings,
        vendors: VendorDirectory,
        source: Box<dyn PriceSource>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let chart_service = ChartService::new(&settings);
        Ok(Self {
            settings,
            vendors,
            source,
            chart_service,
            latest_request: AtomicU64::new(0),
        })
    }

    /// Create a chart facade backed by the HTTP price API at `settings.api_base_url`.
    pub fn with_http_source(settings: Settings, vendors: VendorDirectory) -> Result<Self, CoreError> {
        let base_url = settings
            .api_base_url
            .clone()
            .ok_or_else(|| CoreError::Config("api_base_url is required for the HTTP source".into()))?;
        Self::new(settings, vendors, Box::new(HttpPriceSource::new(base_url)))
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn vendors(&self) -> &VendorDirectory {
        &self.vendors
    }

    #[must_use]
    pub fn chart_service(&self) -> &ChartService {
        &self.chart_service
    }

    /// The initial selection: the given products across every enabled vendor.
    #[must_use]
    pub fn default_selection<P>(&self, product_codes: P) -> Selection
    where
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Selection::all_vendors(product_codes, &self.vendors)
    }

    // ── Chart Loading ───────────────────────────────────────────────

    /// Fetch prices for `selection` and build the chart.
    ///
    /// Every call supersedes the loads started before it. If a newer load
    /// begins while this one awaits the source, the fetched data is dropped
    /// and `ChartUpdate::Superseded` is returned, so a slow stale response
    /// can never overwrite a newer chart. A stale fetch error is dropped the
    /// same way.
    ///
    /// A selection without products or vendors renders an empty chart
    /// without touching the source.
    #[tracing::instrument(
        skip_all,
        fields(products = selection.product_codes.len(), vendors = selection.vendor_ids.len())
    )]
    pub async fn load_chart(&self, selection: &Selection) -> Result<ChartUpdate, CoreError> {
        let ticket = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;

        if selection.is_empty() {
            return Ok(ChartUpdate::Render(ChartData::empty()));
        }
        selection.validate()?;

        let fetched = self.source.get_prices(selection).await;
        if !self.is_latest(ticket) {
            tracing::warn!(
                ticket,
                source = self.source.name(),
                failed = fetched.is_err(),
                "discarding superseded price response"
            );
            return Ok(ChartUpdate::Superseded);
        }
        let response = fetched?;

        let chart = self.chart_service.build_chart(&response, &self.vendors)?;
        tracing::debug!(
            days = chart.snapshots.len(),
            lines = chart.lines.len(),
            "chart ready"
        );
        Ok(ChartUpdate::Render(chart))
    }

    /// Product codes matching `prefix` at the given vendors (at most 20).
    #[tracing::instrument(skip_all, fields(prefix = prefix))]
    pub async fn suggest(
        &self,
        prefix: &str,
        vendor_ids: &BTreeSet<String>,
    ) -> Result<Vec<String>, CoreError> {
        if prefix.is_empty() || vendor_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut terms = self.source.get_suggestions(prefix, vendor_ids).await?;
        terms.truncate(MAX_SUGGESTIONS);
        Ok(terms)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == ticket
    }
}
