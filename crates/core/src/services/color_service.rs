use crate::models::chart::{LineShape, LineStyle, StrokeStyle};
use crate::models::series::{is_sale_key, key_prefix};

/// Fixed line palette. Order matters: colors are picked by index.
pub const PALETTE: [&str; 14] = [
    "#c10000", "#c15b00", "#c1ae00", "#5dc100", "#00c184", "#003ac1", "#7800c1", "#c100ab",
    "#000000", "#525252", "#003fff", "#ff0000", "#ff00fb", "#27ff00",
];

pub const LINE_WIDTH: u8 = 2;

/// Assigns each series a color and stroke style.
///
/// Colors come from the vendor-product prefix of the key, so the regular and
/// sale lines of one product share a color; the sale line is dashed.
pub struct ColorService;

impl ColorService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of UTF-16 code units.
    ///
    /// Deliberately weak: existing charts depend on which color each name
    /// gets, so this must not be swapped for a better hash.
    pub fn name_hash(name: &str) -> u64 {
        name.encode_utf16().map(u64::from).sum()
    }

    /// Color for a vendor-product prefix such as `"Elko - SKU1"`.
    pub fn color_for_prefix(&self, prefix: &str) -> &'static str {
        let index = Self::name_hash(prefix) % PALETTE.len() as u64;
        PALETTE[index as usize]
    }

    /// Color for a full series key; the price-kind suffix is ignored.
    pub fn color_for_key(&self, key: &str) -> &'static str {
        self.color_for_prefix(key_prefix(key))
    }

    pub fn stroke_for_key(&self, key: &str) -> StrokeStyle {
        if is_sale_key(key) {
            StrokeStyle::Dashed
        } else {
            StrokeStyle::Solid
        }
    }

    pub fn line_style(&self, key: &str) -> LineStyle {
        LineStyle {
            key: key.to_string(),
            color: self.color_for_key(key).to_string(),
            stroke: self.stroke_for_key(key),
            stroke_width: LINE_WIDTH,
            shape: LineShape::StepAfter,
            show_dots: false,
        }
    }
}

impl Default for ColorService {
    fn default() -> Self {
        Self::new()
    }
}
