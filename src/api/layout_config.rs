use serde::{Deserialize, Serialize};

use crate::core::candlestick::validate_width_scale;
use crate::core::{DEFAULT_MIN_SPACING_PX, DEFAULT_WIDTH_SCALE};
use crate::error::{ChartError, ChartResult};

/// Right-hand column reserved by `LayoutConfig::with_axis_labels`.
pub const DEFAULT_PRICE_AXIS_WIDTH_PX: u32 = 60;
/// Bottom row reserved by `LayoutConfig::with_axis_labels`.
pub const DEFAULT_TIME_AXIS_HEIGHT_PX: u32 = 40;

/// Layout parameters passed explicitly into every layout pass.
///
/// This type is serializable so hosts can persist chart setup alongside their
/// data files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_min_spacing_px")]
    pub min_spacing_px: f64,
    #[serde(default = "default_width_scale")]
    pub width_scale: f64,
    /// Zero disables price labels.
    #[serde(default)]
    pub price_axis_width_px: u32,
    /// Zero disables date labels.
    #[serde(default)]
    pub time_axis_height_px: u32,
    #[serde(default = "default_label_padding_px")]
    pub label_padding_px: f64,
    #[serde(default = "default_tooltips")]
    pub tooltips: bool,
    #[serde(default = "default_tooltip_offset_px")]
    pub tooltip_offset_px: f64,
    #[serde(default = "default_tooltip_line_height_px")]
    pub tooltip_line_height_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_spacing_px: default_min_spacing_px(),
            width_scale: default_width_scale(),
            price_axis_width_px: 0,
            time_axis_height_px: 0,
            label_padding_px: default_label_padding_px(),
            tooltips: default_tooltips(),
            tooltip_offset_px: default_tooltip_offset_px(),
            tooltip_line_height_px: default_tooltip_line_height_px(),
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse layout config: {e}")))?;
        config.validate()
    }

    /// Sets the minimum pixel gap between neighbouring ticks on both axes.
    #[must_use]
    pub fn with_min_spacing(mut self, min_spacing_px: f64) -> Self {
        self.min_spacing_px = min_spacing_px;
        self
    }

    /// Sets candle body width as a fraction of its column.
    #[must_use]
    pub fn with_width_scale(mut self, width_scale: f64) -> Self {
        self.width_scale = width_scale;
        self
    }

    /// Reserves label space on the right (price) and bottom (time) edges.
    #[must_use]
    pub fn with_axis_reservations(
        mut self,
        price_axis_width_px: u32,
        time_axis_height_px: u32,
    ) -> Self {
        self.price_axis_width_px = price_axis_width_px;
        self.time_axis_height_px = time_axis_height_px;
        self
    }

    /// Reserves the default label space on both axes.
    #[must_use]
    pub fn with_axis_labels(self) -> Self {
        self.with_axis_reservations(DEFAULT_PRICE_AXIS_WIDTH_PX, DEFAULT_TIME_AXIS_HEIGHT_PX)
    }

    #[must_use]
    pub fn with_tooltips(mut self, enabled: bool) -> Self {
        self.tooltips = enabled;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.min_spacing_px.is_finite() || self.min_spacing_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "min spacing must be finite and > 0".to_owned(),
            ));
        }
        validate_width_scale(self.width_scale)?;
        for (name, value) in [
            ("label padding", self.label_padding_px),
            ("tooltip offset", self.tooltip_offset_px),
            ("tooltip line height", self.tooltip_line_height_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

fn default_min_spacing_px() -> f64 {
    DEFAULT_MIN_SPACING_PX
}

fn default_width_scale() -> f64 {
    DEFAULT_WIDTH_SCALE
}

fn default_label_padding_px() -> f64 {
    4.0
}

fn default_tooltips() -> bool {
    true
}

fn default_tooltip_offset_px() -> f64 {
    5.0
}

fn default_tooltip_line_height_px() -> f64 {
    18.0
}

#[cfg(test)]
mod tests {
    use super::LayoutConfig;

    #[test]
    fn missing_fields_take_defaults() {
        let config = LayoutConfig::from_json_str(r#"{ "min_spacing_px": 30 }"#).expect("config");
        assert_eq!(config.min_spacing_px, 30.0);
        assert_eq!(config.width_scale, 0.75);
        assert_eq!(config.price_axis_width_px, 0);
        assert!(config.tooltips);
    }

    #[test]
    fn invalid_width_scale_is_rejected() {
        let err = LayoutConfig::from_json_str(r#"{ "width_scale": 1.5 }"#).expect_err("invalid");
        assert!(err.to_string().contains("width scale"));
    }

    #[test]
    fn axis_labels_reserve_default_space() {
        let config = LayoutConfig::new().with_axis_labels();
        assert_eq!(config.price_axis_width_px, 60);
        assert_eq!(config.time_axis_height_px, 40);
    }
}
