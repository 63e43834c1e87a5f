use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::errors::CoreError;
use crate::models::query::{PriceResponse, Selection};

/// Most suggestions a source returns for one autocomplete prefix.
pub const MAX_SUGGESTIONS: usize = 20;

/// Trait abstraction for the backend that stores raw price intervals.
///
/// The chart core only consumes what this returns; transport, storage and
/// search live behind it. Swap the implementation (HTTP, in-memory fixtures)
/// without touching the merge or presentation code.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Interval prices for every selected product at every selected vendor.
    async fn get_prices(&self, selection: &Selection) -> Result<PriceResponse, CoreError>;

    /// Product codes containing `prefix`, limited to the given vendors.
    /// Ordered by the source, at most `MAX_SUGGESTIONS` entries.
    async fn get_suggestions(
        &self,
        prefix: &str,
        vendor_ids: &BTreeSet<String>,
    ) -> Result<Vec<String>, CoreError>;
}
