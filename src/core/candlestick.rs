use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{CandleClass, OhlcPoint, ScaleMapper};
use crate::error::{ChartError, ChartResult};

/// Default body width as a fraction of the candle column.
pub const DEFAULT_WIDTH_SCALE: f64 = 0.75;

/// Resolved pixel geometry of one candle.
///
/// Vertical extents are stored as lengths stacked down from `y_top`:
/// upper wick, then body, then lower wick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub index: usize,
    pub x: f64,
    pub body_width: f64,
    pub y_top: f64,
    pub upper_wick: f64,
    pub body_height: f64,
    pub lower_wick: f64,
    pub class: CandleClass,
}

impl CandleGeometry {
    /// Horizontal centre shared by both wicks.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.body_width / 2.0
    }

    #[must_use]
    pub fn body_top(&self) -> f64 {
        self.y_top + self.upper_wick
    }

    #[must_use]
    pub fn body_bottom(&self) -> f64 {
        self.body_top() + self.body_height
    }

    #[must_use]
    pub fn wick_bottom(&self) -> f64 {
        self.body_bottom() + self.lower_wick
    }
}

pub fn validate_width_scale(width_scale: f64) -> ChartResult<()> {
    if !width_scale.is_finite() || width_scale <= 0.0 || width_scale > 1.0 {
        return Err(ChartError::InvalidData(
            "candle width scale must be finite and in (0, 1]".to_owned(),
        ));
    }
    Ok(())
}

/// Projects a series into candle geometry, one entry per point in order.
///
/// Pure and side-effect free; identical inputs give identical output.
pub fn project_candles(
    points: &[OhlcPoint],
    mapper: ScaleMapper,
    width_scale: f64,
) -> ChartResult<Vec<CandleGeometry>> {
    validate_width_scale(width_scale)?;

    #[cfg(feature = "parallel-projection")]
    {
        let projected: Vec<ChartResult<CandleGeometry>> = points
            .par_iter()
            .enumerate()
            .map(|(index, point)| project_single_candle(index, point, mapper, width_scale))
            .collect();
        projected.into_iter().collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        points
            .iter()
            .enumerate()
            .map(|(index, point)| project_single_candle(index, point, mapper, width_scale))
            .collect()
    }
}

fn project_single_candle(
    index: usize,
    point: &OhlcPoint,
    mapper: ScaleMapper,
    width_scale: f64,
) -> ChartResult<CandleGeometry> {
    let column_width = mapper.column_width();
    let body_width = column_width * width_scale;
    let scale = mapper.pixels_per_price();

    Ok(CandleGeometry {
        index,
        x: mapper.index_to_x(index) + (column_width - body_width) / 2.0,
        body_width,
        y_top: mapper.price_to_y(point.high)?,
        upper_wick: (point.high - point.body_high()) * scale,
        body_height: (point.open - point.close).abs() * scale,
        lower_wick: (point.body_low() - point.low) * scale,
        class: point.class(),
    })
}
