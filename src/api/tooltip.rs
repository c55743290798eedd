use crate::core::{CandleGeometry, OhlcPoint};
use crate::render::{Tooltip, TooltipLine};

use super::LayoutConfig;

/// Lays out the hover tooltip of one candle beside its body's vertical centre.
pub(super) fn layout_tooltip(
    point: &OhlcPoint,
    candle: &CandleGeometry,
    config: &LayoutConfig,
) -> Tooltip {
    let offset = config.tooltip_offset_px;
    let anchor_x = candle.x + candle.body_width + offset;
    let anchor_y = candle.body_top() + candle.body_height / 2.0;

    let entries = [
        format!("date: {}", point.date),
        format!("open: {}", point.open),
        format!("high: {}", point.high),
        format!("low: {}", point.low),
        format!("close: {}", point.close),
    ];
    let lines = entries
        .into_iter()
        .enumerate()
        .map(|(row, text)| TooltipLine {
            text,
            x: anchor_x + offset,
            y: anchor_y + offset + row as f64 * config.tooltip_line_height_px,
        })
        .collect();

    Tooltip {
        index: candle.index,
        anchor_x,
        anchor_y,
        lines,
    }
}
