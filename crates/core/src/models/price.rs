use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One contiguous window during which a price was valid.
///
/// Timestamps are seconds since the Unix epoch. `start` is truncated to the
/// start of its day during expansion, `end` is rounded up to the next day
/// boundary and treated as exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInterval {
    pub start: i64,
    pub end: i64,
    /// Whole currency units, no minor units.
    pub price: u64,
}

impl PriceInterval {
    pub fn new(start: i64, end: i64, price: u64) -> Self {
        Self { start, end, price }
    }

    /// Reject intervals whose start lies after their end.
    /// `series_key` only feeds the error message.
    pub fn validate(&self, series_key: &str) -> Result<(), CoreError> {
        if self.start > self.end {
            return Err(CoreError::InvalidInterval {
                series_key: series_key.to_string(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Which price a series tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceKind {
    /// The list price
    Regular,
    /// A temporary discounted price
    Sale,
}

impl PriceKind {
    /// Label used as the last segment of a series key.
    pub fn label(&self) -> &'static str {
        match self {
            PriceKind::Regular => "price",
            PriceKind::Sale => "salePrice",
        }
    }
}

impl std::fmt::Display for PriceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
