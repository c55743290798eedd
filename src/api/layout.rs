use tracing::{debug, trace};

use crate::core::primitives::format_tick_price;
use crate::core::{
    OhlcSeries, PriceTicks, ScaleMapper, TimeTicks, ValueRange, Viewport, project_candles,
    select_price_ticks, select_time_ticks,
};
use crate::error::ChartResult;
use crate::render::{Axis, Rect, Scene, Segment, Shape, TextHAlign, WickPart};

use super::LayoutConfig;
use super::tooltip::layout_tooltip;

/// Recomputes the complete scene for `series` inside a container of `extent`.
///
/// `extent` is the container's content box; axis reservations from `config`
/// are carved out of its right and bottom edges. The pass is pure: identical
/// inputs always produce an identical scene, and nothing is retained between
/// calls.
///
/// Fails with the "cannot render" error (`ChartError::InvalidViewport`) when the
/// plot area is empty, before any geometry is computed.
pub fn layout_scene(
    series: &OhlcSeries,
    extent: Viewport,
    config: &LayoutConfig,
) -> ChartResult<Scene> {
    let config = config.validate()?;
    let extent = extent.ensure_valid()?;
    let plot = extent
        .shrink(config.price_axis_width_px, config.time_axis_height_px)
        .ensure_valid()?;
    series.validate()?;

    let range = ValueRange::from_points(&series.points)?;
    let mapper = ScaleMapper::new(range, plot)?;
    let time_ticks = select_time_ticks(mapper, config.min_spacing_px)?;
    let price_ticks = select_price_ticks(mapper, config.min_spacing_px)?;
    trace!(
        time_ticks = time_ticks.ticks.len(),
        price_ticks = price_ticks.ticks.len(),
        "selected axis ticks"
    );
    let candles = project_candles(&series.points, mapper, config.width_scale)?;

    let tick_count = time_ticks.ticks.len() + price_ticks.ticks.len();
    let mut shapes = Vec::with_capacity(2 * tick_count + 3 * candles.len());
    push_grid_lines(&mut shapes, plot, &time_ticks, &price_ticks);
    push_tick_labels(&mut shapes, series, plot, &config, &time_ticks, &price_ticks);

    for candle in &candles {
        let center_x = candle.center_x();
        shapes.push(Shape::CandleBody {
            index: candle.index,
            class: candle.class,
            rect: Rect {
                x: candle.x,
                y: candle.body_top(),
                width: candle.body_width,
                height: candle.body_height,
            },
        });
        shapes.push(Shape::Wick {
            index: candle.index,
            class: candle.class,
            part: WickPart::Upper,
            segment: Segment {
                x1: center_x,
                y1: candle.y_top,
                x2: center_x,
                y2: candle.body_top(),
            },
        });
        shapes.push(Shape::Wick {
            index: candle.index,
            class: candle.class,
            part: WickPart::Lower,
            segment: Segment {
                x1: center_x,
                y1: candle.body_bottom(),
                x2: center_x,
                y2: candle.wick_bottom(),
            },
        });
    }

    let tooltips = if config.tooltips {
        series
            .points
            .iter()
            .zip(&candles)
            .map(|(point, candle)| layout_tooltip(point, candle, &config))
            .collect()
    } else {
        Vec::new()
    };

    debug!(
        candles = candles.len(),
        plot_width = plot.width,
        plot_height = plot.height,
        price_step = price_ticks.step,
        time_spacing = time_ticks.spacing,
        shapes = shapes.len(),
        "laid out candlestick scene"
    );

    Ok(Scene {
        title: series.title.clone(),
        extent,
        plot,
        range,
        price_step: price_ticks.step,
        time_spacing: time_ticks.spacing,
        shapes,
        tooltips,
    })
}

fn push_grid_lines(
    shapes: &mut Vec<Shape>,
    plot: Viewport,
    time_ticks: &TimeTicks,
    price_ticks: &PriceTicks,
) {
    for tick in &time_ticks.ticks {
        shapes.push(Shape::GridLine {
            axis: Axis::Time,
            segment: Segment {
                x1: tick.x,
                y1: 0.0,
                x2: tick.x,
                y2: plot.height_px(),
            },
        });
    }
    for tick in &price_ticks.ticks {
        shapes.push(Shape::GridLine {
            axis: Axis::Price,
            segment: Segment {
                x1: 0.0,
                y1: tick.y,
                x2: plot.width_px(),
                y2: tick.y,
            },
        });
    }
}

fn push_tick_labels(
    shapes: &mut Vec<Shape>,
    series: &OhlcSeries,
    plot: Viewport,
    config: &LayoutConfig,
    time_ticks: &TimeTicks,
    price_ticks: &PriceTicks,
) {
    if config.time_axis_height_px > 0 {
        let y = plot.height_px() + f64::from(config.time_axis_height_px) / 2.0;
        for tick in &time_ticks.ticks {
            let Some(point) = series.points.get(tick.index) else {
                continue;
            };
            let text = point.date.to_string();
            if text.is_empty() {
                continue;
            }
            shapes.push(Shape::TickLabel {
                axis: Axis::Time,
                text,
                x: tick.x,
                y,
                align: TextHAlign::Center,
            });
        }
    }
    if config.price_axis_width_px > 0 {
        let x = plot.width_px() + config.label_padding_px;
        for tick in &price_ticks.ticks {
            shapes.push(Shape::TickLabel {
                axis: Axis::Price,
                text: format_tick_price(tick.price, price_ticks.step),
                x,
                y: tick.y,
                align: TextHAlign::Left,
            });
        }
    }
}
