use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::OhlcPoint;
use crate::error::{ChartError, ChartResult};

/// Relative half-height applied around a perfectly flat series.
pub const FLAT_RANGE_PADDING_RATIO: f64 = 0.01;
/// Half-height used when a flat series sits exactly at zero.
pub const FLAT_RANGE_ZERO_PADDING: f64 = 1.0;

/// Price extent and length of one series, derived once per draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    lowest_low: f64,
    highest_high: f64,
    length: usize,
    #[serde(default)]
    padded: bool,
}

impl ValueRange {
    /// Builds a range from explicit bounds. The span must be finite and non-zero.
    pub fn new(lowest_low: f64, highest_high: f64, length: usize) -> ChartResult<Self> {
        if !lowest_low.is_finite() || !highest_high.is_finite() || lowest_low >= highest_high {
            return Err(ChartError::InvalidData(
                "value range must be finite with lowest low < highest high".to_owned(),
            ));
        }
        if length == 0 {
            return Err(ChartError::InvalidData(
                "value range length must be > 0".to_owned(),
            ));
        }

        Ok(Self {
            lowest_low,
            highest_high,
            length,
            padded: false,
        })
    }

    /// Folds the lowest low and highest high of `points`.
    ///
    /// A flat series (`highest high == lowest low == v`) is widened to
    /// `[v - p, v + p]` with `p = |v| * FLAT_RANGE_PADDING_RATIO`
    /// (`FLAT_RANGE_ZERO_PADDING` when `v == 0`), which centres it vertically.
    pub fn from_points(points: &[OhlcPoint]) -> ChartResult<Self> {
        if points.is_empty() {
            return Err(ChartError::InvalidData(
                "series must contain at least one candle".to_owned(),
            ));
        }

        let (lowest_low, highest_high) = points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(low, high), point| (low.min(point.low), high.max(point.high)),
        );
        if !lowest_low.is_finite() || !highest_high.is_finite() {
            return Err(ChartError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }

        if lowest_low < highest_high {
            return Self::new(lowest_low, highest_high, points.len());
        }

        let level = lowest_low;
        let padding = if level == 0.0 {
            FLAT_RANGE_ZERO_PADDING
        } else {
            level.abs() * FLAT_RANGE_PADDING_RATIO
        };
        warn!(level, padding, "flat price series, padding value range");

        let mut range = Self::new(level - padding, level + padding, points.len())?;
        range.padded = true;
        Ok(range)
    }

    #[must_use]
    pub fn lowest_low(self) -> f64 {
        self.lowest_low
    }

    #[must_use]
    pub fn highest_high(self) -> f64 {
        self.highest_high
    }

    #[must_use]
    pub fn length(self) -> usize {
        self.length
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.highest_high - self.lowest_low
    }

    /// Whether the flat-series fallback widened this range.
    #[must_use]
    pub fn is_padded(self) -> bool {
        self.padded
    }
}
