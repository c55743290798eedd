use serde::{Deserialize, Serialize};

use crate::core::ScaleMapper;
use crate::error::{ChartError, ChartResult};

/// Default minimum pixel gap between neighbouring axis ticks.
pub const DEFAULT_MIN_SPACING_PX: f64 = 24.0;

/// Mantissas a "nice" step may take, in ascending order.
pub const NICE_MANTISSAS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

// Absorbs float noise in `raw / 10^exp` so exact nice values are not bumped up.
const MANTISSA_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub price: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTicks {
    pub step: f64,
    pub ticks: Vec<PriceTick>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeTick {
    pub index: usize,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTicks {
    /// Number of columns between neighbouring ticks.
    pub spacing: usize,
    pub ticks: Vec<TimeTick>,
}

/// Rounds `raw_step` up to the nearest `d * 10^k` with `d` in `{1, 2, 5, 10}`.
pub fn nice_step(raw_step: f64) -> ChartResult<f64> {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return Err(ChartError::InvalidData(
            "raw tick step must be finite and > 0".to_owned(),
        ));
    }

    let exponent = raw_step.log10().floor() as i32;
    let magnitude = 10f64.powi(exponent);
    let mantissa = raw_step / magnitude;
    let nice = NICE_MANTISSAS
        .into_iter()
        .find(|candidate| mantissa <= candidate * (1.0 + MANTISSA_EPSILON))
        .unwrap_or(10.0);
    Ok(nice * magnitude)
}

fn validate_min_spacing(min_spacing_px: f64) -> ChartResult<()> {
    if !min_spacing_px.is_finite() || min_spacing_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "minimum tick spacing must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

/// Chooses round price ticks inside the mapper's value range.
///
/// At most `height / min_spacing_px` ticks fit; the raw step that would produce
/// exactly that many is rounded up to a nice step, so neighbouring ticks are
/// never closer than `min_spacing_px`.
pub fn select_price_ticks(mapper: ScaleMapper, min_spacing_px: f64) -> ChartResult<PriceTicks> {
    validate_min_spacing(min_spacing_px)?;

    let range = mapper.range();
    let count = mapper.plot().height_px() / min_spacing_px;
    let step = nice_step(range.span() / count)?;

    // Multiples of `step` rather than a running sum keep error from accumulating.
    let first_multiple = (range.lowest_low() / step).ceil();
    let last_multiple = (range.highest_high() / step).floor();
    // One spare candidate in case `highest_high / step` rounded down; the
    // bound check below still drops it when it overshoots.
    let candidates = ((last_multiple - first_multiple).max(0.0) as u32).saturating_add(1);
    let min_gap = step * (1.0 - MANTISSA_EPSILON);
    let floor = range.lowest_low() - step * MANTISSA_EPSILON;
    let mut ticks: Vec<PriceTick> = Vec::new();
    for k in 0..=candidates {
        let price = (first_multiple + f64::from(k)) * step;
        if price > range.highest_high() {
            break;
        }
        // Far from zero the f64 grid can be coarser than `step`: multiples
        // collapse or round below the range, and neighbours may end up closer
        // than one step.
        if price < floor {
            continue;
        }
        if ticks.last().is_some_and(|last| price - last.price < min_gap) {
            continue;
        }
        ticks.push(PriceTick {
            price,
            y: mapper.price_to_y(price)?,
        });
    }

    Ok(PriceTicks { step, ticks })
}

/// Chooses column ticks every `spacing` candles, centred in their columns.
///
/// `spacing` is the smallest positive integer with
/// `column_width * spacing >= min_spacing_px`.
pub fn select_time_ticks(mapper: ScaleMapper, min_spacing_px: f64) -> ChartResult<TimeTicks> {
    validate_min_spacing(min_spacing_px)?;

    let column_width = mapper.column_width();
    let mut spacing = ((min_spacing_px / column_width).ceil() as usize).max(1);
    // The division can land one off either way once rounded.
    while column_width * (spacing as f64) < min_spacing_px {
        spacing += 1;
    }
    while spacing > 1 && column_width * ((spacing - 1) as f64) >= min_spacing_px {
        spacing -= 1;
    }

    let length = mapper.range().length();
    let half_column = column_width / 2.0;
    let ticks = (0..length)
        .step_by(spacing)
        .map(|index| TimeTick {
            index,
            x: mapper.index_to_x(index) + half_column,
        })
        .collect();

    Ok(TimeTicks { spacing, ticks })
}
