use serde::{Deserialize, Serialize};

use crate::core::CandleClass;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// `#rrggbb` form of the opaque channels.
    #[must_use]
    pub fn to_hex(self) -> String {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.red),
            channel(self.green),
            channel(self.blue)
        )
    }
}

/// Cosmetic styling applied by renderers; never consulted by layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub bull_body: Color,
    pub bear_body: Color,
    pub bull_border: Color,
    pub bear_border: Color,
    pub bull_wick: Color,
    pub bear_wick: Color,
    pub grid: Color,
    pub label: Color,
    pub tooltip_background: Color,
    pub tooltip_border: Color,
    pub tooltip_text: Color,
    pub background: Color,
    pub wick_width_px: f64,
    pub grid_width_px: f64,
    pub border_width_px: f64,
    pub font_size_px: f64,
}

impl Default for Palette {
    fn default() -> Self {
        let black = Color::rgb(0.0, 0.0, 0.0);
        Self {
            bull_body: Color::rgb8(144, 238, 144),
            bear_body: Color::rgb8(240, 128, 128),
            bull_border: Color::rgb8(0, 100, 0),
            bear_border: Color::rgb8(139, 0, 0),
            bull_wick: Color::rgb8(0, 100, 0),
            bear_wick: Color::rgb8(139, 0, 0),
            grid: black.with_alpha(0.3),
            label: black,
            tooltip_background: Color::rgb8(204, 204, 204).with_alpha(0.8),
            tooltip_border: black,
            tooltip_text: black,
            background: Color::rgb(1.0, 1.0, 1.0),
            wick_width_px: 2.0,
            grid_width_px: 1.0,
            border_width_px: 1.0,
            font_size_px: 12.0,
        }
    }
}

impl Palette {
    #[must_use]
    pub fn body(&self, class: CandleClass) -> Color {
        match class {
            CandleClass::Bull => self.bull_body,
            CandleClass::Bear => self.bear_body,
        }
    }

    #[must_use]
    pub fn border(&self, class: CandleClass) -> Color {
        match class {
            CandleClass::Bull => self.bull_border,
            CandleClass::Bear => self.bear_border,
        }
    }

    #[must_use]
    pub fn wick(&self, class: CandleClass) -> Color {
        match class {
            CandleClass::Bull => self.bull_wick,
            CandleClass::Bear => self.bear_wick,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.bull_body,
            self.bear_body,
            self.bull_border,
            self.bear_border,
            self.bull_wick,
            self.bear_wick,
            self.grid,
            self.label,
            self.tooltip_background,
            self.tooltip_border,
            self.tooltip_text,
            self.background,
        ] {
            color.validate()?;
        }
        for (name, value) in [
            ("wick width", self.wick_width_px),
            ("grid width", self.grid_width_px),
            ("font size", self.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "palette {name} must be finite and > 0"
                )));
            }
        }
        if !self.border_width_px.is_finite() || self.border_width_px < 0.0 {
            return Err(ChartError::InvalidData(
                "palette border width must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}
