use serde::{Deserialize, Serialize};

use super::price::{PriceInterval, PriceKind};

/// Separator between the segments of a series key.
pub const KEY_SEPARATOR: &str = " - ";

/// Identifies one logical line on the chart: a vendor's price (or sale price)
/// for one product code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesSelector {
    /// Display name of the vendor, already resolved from its id
    pub vendor_name: String,

    /// Product code (SKU) as stored by the vendor
    pub product_code: String,

    /// Regular or sale price
    pub price_kind: PriceKind,
}

impl SeriesSelector {
    pub fn new(
        vendor_name: impl Into<String>,
        product_code: impl Into<String>,
        price_kind: PriceKind,
    ) -> Self {
        Self {
            vendor_name: vendor_name.into(),
            product_code: product_code.into(),
            price_kind,
        }
    }

    /// `"<vendor> - <product> - price"` or `"<vendor> - <product> - salePrice"`.
    ///
    /// This string is the join key for daily snapshots and the lookup key
    /// for line colors.
    pub fn series_key(&self) -> String {
        format!(
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            self.vendor_name,
            self.product_code,
            self.price_kind.label()
        )
    }
}

/// A selector together with the intervals fetched for it, in supplied order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesBatch {
    pub selector: SeriesSelector,
    pub intervals: Vec<PriceInterval>,
}

impl SeriesBatch {
    pub fn new(selector: SeriesSelector, intervals: Vec<PriceInterval>) -> Self {
        Self {
            selector,
            intervals,
        }
    }
}

/// The vendor-product part of a series key: everything before the last separator.
/// Keys without a separator are returned whole.
pub fn key_prefix(key: &str) -> &str {
    match key.rfind(KEY_SEPARATOR) {
        Some(idx) => &key[..idx],
        None => key,
    }
}

/// Whether a series key names a sale-price line.
pub fn is_sale_key(key: &str) -> bool {
    key.strip_suffix(PriceKind::Sale.label())
        .is_some_and(|rest| rest.ends_with(KEY_SEPARATOR))
}
