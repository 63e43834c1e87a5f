use crate::errors::CoreError;
use crate::models::chart::DaySnapshot;
use crate::models::settings::Settings;
use crate::services::calendar::Calendar;

/// Axis tick label, e.g. `Jan-2024`.
pub const TICK_LABEL_FORMAT: &str = "%b-%Y";
/// Tooltip heading, e.g. `02-Jan-2024`.
pub const TOOLTIP_LABEL_FORMAT: &str = "%d-%b-%Y";

/// Labels and axis bounds for the chart.
pub struct FormatService {
    calendar: Calendar,
    thousands_separator: char,
    currency_suffix: String,
    y_axis_step: u64,
    x_axis_padding_secs: i64,
}

impl FormatService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            calendar: Calendar::new(settings.time_zone),
            thousands_separator: settings.thousands_separator,
            currency_suffix: settings.currency_suffix.clone(),
            y_axis_step: settings.y_axis_step.max(1),
            x_axis_padding_secs: settings.x_axis_padding_secs,
        }
    }

    /// `1234567` → `"1.234.567"` (with the default separator).
    pub fn format_price(&self, price: u64) -> String {
        let digits = price.to_string();
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.thousands_separator);
            }
            out.push(c);
        }
        out
    }

    /// `1234567` → `"1.234.567 kr."`
    pub fn format_price_with_unit(&self, price: u64) -> String {
        if self.currency_suffix.is_empty() {
            return self.format_price(price);
        }
        format!("{} {}", self.format_price(price), self.currency_suffix)
    }

    pub fn tick_label(&self, ts: i64) -> Result<String, CoreError> {
        self.calendar.format(ts, TICK_LABEL_FORMAT)
    }

    pub fn tooltip_label(&self, ts: i64) -> Result<String, CoreError> {
        self.calendar.format(ts, TOOLTIP_LABEL_FORMAT)
    }

    /// Lowest value floored and highest value ceiled to the y-axis step.
    /// `None` when no snapshot holds a value.
    pub fn y_domain(&self, snapshots: &[DaySnapshot]) -> Option<(u64, u64)> {
        let mut values = snapshots.iter().flat_map(|s| s.values.values().copied());
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let step = self.y_axis_step;
        let lower = (min / step) * step;
        let upper = max.div_ceil(step).saturating_mul(step);
        Some((lower, upper))
    }

    /// Earliest timestamp minus padding, and the latest timestamp.
    pub fn x_domain(&self, snapshots: &[DaySnapshot]) -> Option<(i64, i64)> {
        let min = snapshots.iter().map(|s| s.timestamp).min()?;
        let max = snapshots.iter().map(|s| s.timestamp).max()?;
        Some((min.saturating_sub(self.x_axis_padding_secs), max))
    }
}

impl Default for FormatService {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
