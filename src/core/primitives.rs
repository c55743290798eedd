use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::error::{ChartError, ChartResult};

const MAX_LABEL_PRECISION: u32 = 12;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Number of fractional digits needed to tell consecutive ticks of `step` apart.
#[must_use]
pub fn step_precision(step: f64) -> u32 {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    // Nudge before `ceil` so exact powers of ten (0.1, 0.01) don't gain a digit.
    let digits = (-step.log10() - 1e-9).ceil();
    (digits.max(0.0) as u32).min(MAX_LABEL_PRECISION)
}

/// Formats a tick price with the fixed precision implied by the tick step.
///
/// Rounding goes through `Decimal` so accumulated float noise such as
/// `0.30000000000000004` never reaches a label.
#[must_use]
pub fn format_tick_price(price: f64, step: f64) -> String {
    let precision = step_precision(step);
    match Decimal::from_f64(price) {
        Some(value) => {
            let mut rounded = value.round_dp(precision);
            rounded.rescale(precision);
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            rounded.to_string()
        }
        None => format!("{price:.prec$}", prec = precision as usize),
    }
}
