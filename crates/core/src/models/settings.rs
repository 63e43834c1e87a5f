use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Presentation and calendar settings for chart generation.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Time zone whose civil calendar defines day and month boundaries.
    pub time_zone: Tz,

    /// Inserted between groups of three digits when formatting prices.
    pub thousands_separator: char,

    /// Unit appended after formatted prices (e.g., "kr.").
    pub currency_suffix: String,

    /// Y-axis bounds are rounded outward to a multiple of this.
    pub y_axis_step: u64,

    /// Extra room, in seconds, left of the earliest point on the x axis.
    pub x_axis_padding_secs: i64,

    /// Base URL of the price/autocomplete API, if the HTTP source is used.
    pub api_base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::Atlantic::Reykjavik,
            thousands_separator: '.',
            currency_suffix: "kr.".to_string(),
            y_axis_step: 10_000,
            x_axis_padding_secs: 500_000,
            api_base_url: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.y_axis_step == 0 {
            return Err(CoreError::Config("y_axis_step must be positive".into()));
        }
        if self.x_axis_padding_secs < 0 {
            return Err(CoreError::Config(
                "x_axis_padding_secs must not be negative".into(),
            ));
        }
        if self.thousands_separator.is_ascii_digit() {
            return Err(CoreError::Config(
                "thousands_separator must not be a digit".into(),
            ));
        }
        Ok(())
    }
}
