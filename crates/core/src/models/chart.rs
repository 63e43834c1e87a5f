use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day on the chart: every series value known for that day.
///
/// The core generates these; the frontend just renders them.
/// Serializes flat, e.g. `{"timestamp": 1704067200, "Vendor - SKU1 - price": 100}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySnapshot {
    /// Start of the day in the reference time zone, seconds since epoch
    pub timestamp: i64,

    /// Series key → price. Sparse: only series whose interval covers this day.
    #[serde(flatten)]
    pub values: BTreeMap<String, u64>,
}

impl DaySnapshot {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            values: BTreeMap::new(),
        }
    }

    /// Set the price for `key`, replacing any previous value for that key only.
    pub fn insert(&mut self, key: impl Into<String>, price: u64) {
        self.values.insert(key.into(), price);
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// How a line's stroke is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeStyle {
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// SVG `stroke-dasharray` value for this style.
    pub fn dash_array(&self) -> &'static str {
        match self {
            StrokeStyle::Solid => "0",
            StrokeStyle::Dashed => "4 2",
        }
    }
}

/// Interpolation between consecutive points of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineShape {
    /// Hold each value until the next point, then jump.
    StepAfter,
    Linear,
}

/// Rendering attributes for one series line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Series key this line plots
    pub key: String,

    /// Hex color, e.g. `#c10000`
    pub color: String,

    pub stroke: StrokeStyle,

    pub stroke_width: u8,

    pub shape: LineShape,

    /// Draw a marker at every data point
    pub show_dots: bool,
}

/// Everything a renderer needs to draw one price history chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Merged daily series, ascending by timestamp
    pub snapshots: Vec<DaySnapshot>,

    /// First-of-month timestamps for the x axis
    pub ticks: Vec<i64>,

    /// One entry per distinct series key, in order of first appearance
    pub lines: Vec<LineStyle>,

    /// Rounded (min, max) for the y axis
    pub y_domain: Option<(u64, u64)>,

    /// Padded (min, max) for the x axis
    pub x_domain: Option<(i64, i64)>,
}

impl ChartData {
    pub fn empty() -> Self {
        Self {
            snapshots: Vec::new(),
            ticks: Vec::new(),
            lines: Vec::new(),
            y_domain: None,
            x_domain: None,
        }
    }

    /// Nothing to render.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
