use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::CoreError;

use super::price::PriceInterval;
use super::vendor::VendorDirectory;

/// Optional bounds on the fetched history. Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl DateRange {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    pub fn between(start: i64, end: i64) -> Self {
        Self::new(Some(start), Some(end))
    }
}

/// What the user picked: product codes, vendors, and an optional date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub product_codes: BTreeSet<String>,
    pub vendor_ids: BTreeSet<String>,
    pub date_range: Option<DateRange>,
}

impl Selection {
    pub fn new<P, V>(product_codes: P, vendor_ids: V) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            product_codes: product_codes.into_iter().map(Into::into).collect(),
            vendor_ids: vendor_ids.into_iter().map(Into::into).collect(),
            date_range: None,
        }
    }

    /// Select the given product codes across every enabled vendor in `directory`.
    pub fn all_vendors<P>(product_codes: P, directory: &VendorDirectory) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self::new(product_codes, directory.ids())
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// No product or no vendor selected: there is nothing to fetch.
    pub fn is_empty(&self) -> bool {
        self.product_codes.is_empty() || self.vendor_ids.is_empty()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(DateRange {
            start: Some(start),
            end: Some(end),
        }) = self.date_range
        {
            if start > end {
                return Err(CoreError::ValidationError(format!(
                    "date range start {start} is after end {end}"
                )));
            }
        }
        Ok(())
    }
}

/// Price history of one product at one vendor, as returned by a price source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPrices {
    pub product_code: String,
    pub regular: Vec<PriceInterval>,
    /// Absent when the vendor never ran a sale on this product
    pub sale: Option<Vec<PriceInterval>>,
}

/// All requested products for one vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorPrices {
    pub vendor_id: String,
    pub products: Vec<ProductPrices>,
}

/// Result of one price fetch, per vendor then per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResponse {
    pub vendors: Vec<VendorPrices>,
}
