use serde::{Deserialize, Serialize};

use crate::core::{ValueRange, Viewport};
use crate::error::{ChartError, ChartResult};

/// Maps `price` to a pixel row; `highest_high` lands on `0`, `lowest_low` on
/// `pixel_height`.
#[must_use]
pub fn price_to_y(price: f64, range: ValueRange, pixel_height: f64) -> f64 {
    // Divide first so both endpoints come out exact.
    pixel_height * ((range.highest_high() - price) / range.span())
}

/// Maps a series index to the left edge of its column.
#[must_use]
pub fn index_to_x(index: f64, range: ValueRange, pixel_width: f64) -> f64 {
    (pixel_width / range.length() as f64) * index
}

/// Linear mapping between a series' value space and a plot area.
///
/// The vertical axis is inverted: higher prices map to smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMapper {
    range: ValueRange,
    plot: Viewport,
}

impl ScaleMapper {
    pub fn new(range: ValueRange, plot: Viewport) -> ChartResult<Self> {
        let plot = plot.ensure_valid()?;
        Ok(Self { range, plot })
    }

    #[must_use]
    pub fn range(self) -> ValueRange {
        self.range
    }

    #[must_use]
    pub fn plot(self) -> Viewport {
        self.plot
    }

    /// Width of one candle column in pixels.
    #[must_use]
    pub fn column_width(self) -> f64 {
        self.plot.width_px() / self.range.length() as f64
    }

    /// Pixels per price unit.
    #[must_use]
    pub fn pixels_per_price(self) -> f64 {
        self.plot.height_px() / self.range.span()
    }

    pub fn price_to_y(self, price: f64) -> ChartResult<f64> {
        if !price.is_finite() {
            return Err(ChartError::InvalidData("price must be finite".to_owned()));
        }
        Ok(price_to_y(price, self.range, self.plot.height_px()))
    }

    pub fn index_to_x(self, index: usize) -> f64 {
        index_to_x(index as f64, self.range, self.plot.width_px())
    }

    pub fn y_to_price(self, y: f64) -> ChartResult<f64> {
        if !y.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let normalized = y / self.plot.height_px();
        Ok(self.range.highest_high() - normalized * self.range.span())
    }

    /// Column under pixel `x`, or `None` outside the plot.
    #[must_use]
    pub fn x_to_index(self, x: f64) -> Option<usize> {
        if !x.is_finite() || x < 0.0 || x >= self.plot.width_px() {
            return None;
        }
        let index = (x / self.column_width()).floor() as usize;
        Some(index.min(self.range.length() - 1))
    }
}
