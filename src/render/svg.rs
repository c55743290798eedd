use std::fmt::Write as _;

use crate::core::CandleClass;
use crate::error::{ChartError, ChartResult};
use crate::render::{Axis, Color, Palette, Renderer, Scene, Shape, TextHAlign, Tooltip};

// Rough glyph advance used to size tooltip backdrops without font metrics.
const APPROX_GLYPH_WIDTH_RATIO: f64 = 0.6;
const TOOLTIP_PADDING_PX: f64 = 5.0;
const TOOLTIP_CORNER_RADIUS_PX: f64 = 10.0;

/// Serializes scenes into standalone SVG documents.
///
/// Shapes keep their semantic classes (`bull`, `bear`, `grid`, `label`,
/// `tooltip`) so a host stylesheet can layer hover behaviour on top.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    palette: Palette,
    document: String,
}

impl SvgRenderer {
    pub fn new(palette: Palette) -> ChartResult<Self> {
        palette.validate()?;
        Ok(Self {
            palette,
            document: String::new(),
        })
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Last rendered document; empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_document(&self, scene: &Scene) -> Result<String, std::fmt::Error> {
        let palette = &self.palette;
        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = scene.extent.width,
            h = scene.extent.height
        )?;
        if let Some(title) = &scene.title {
            writeln!(out, "  <title>{}</title>", escape(title))?;
        }
        writeln!(
            out,
            r#"  <rect class="background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            scene.extent.width,
            scene.extent.height,
            palette.background.to_hex()
        )?;

        for shape in &scene.shapes {
            match shape {
                Shape::GridLine { axis, segment } => writeln!(
                    out,
                    r#"  <line class="grid {axis}" x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                    segment.x1,
                    segment.y1,
                    segment.x2,
                    segment.y2,
                    stroke(palette.grid, palette.grid_width_px),
                    axis = axis_name(*axis),
                )?,
                Shape::CandleBody { index, class, rect } => writeln!(
                    out,
                    r#"  <rect class="candle {}" data-index="{index}" x="{}" y="{}" width="{}" height="{}" {} {}/>"#,
                    class_name(*class),
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    fill(palette.body(*class)),
                    stroke(palette.border(*class), palette.border_width_px),
                )?,
                Shape::Wick {
                    index,
                    class,
                    segment,
                    ..
                } => writeln!(
                    out,
                    r#"  <line class="shadow {}" data-index="{index}" x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                    class_name(*class),
                    segment.x1,
                    segment.y1,
                    segment.x2,
                    segment.y2,
                    stroke(palette.wick(*class), palette.wick_width_px),
                )?,
                Shape::TickLabel {
                    axis,
                    text,
                    x,
                    y,
                    align,
                } => writeln!(
                    out,
                    r#"  <text class="label {}" x="{x}" y="{y}" text-anchor="{}" dominant-baseline="middle" font-size="{}" {}>{}</text>"#,
                    axis_name(*axis),
                    anchor_name(*align),
                    palette.font_size_px,
                    fill(palette.label),
                    escape(text),
                )?,
            }
        }

        for tooltip in &scene.tooltips {
            self.write_tooltip(&mut out, tooltip)?;
        }

        writeln!(out, "</svg>")?;
        Ok(out)
    }

    fn write_tooltip(&self, out: &mut String, tooltip: &Tooltip) -> std::fmt::Result {
        let palette = &self.palette;
        let Some(first) = tooltip.lines.first() else {
            return Ok(());
        };
        let widest = tooltip
            .lines
            .iter()
            .map(|line| line.text.chars().count())
            .max()
            .unwrap_or(0);
        let last_y = tooltip.lines.last().map_or(first.y, |line| line.y);
        let width = widest as f64 * palette.font_size_px * APPROX_GLYPH_WIDTH_RATIO;
        let height = last_y - first.y + palette.font_size_px;

        writeln!(
            out,
            r#"  <g class="tooltip" data-index="{}">"#,
            tooltip.index
        )?;
        writeln!(
            out,
            r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="{TOOLTIP_CORNER_RADIUS_PX}" {} {}/>"#,
            first.x - TOOLTIP_PADDING_PX,
            first.y - TOOLTIP_PADDING_PX,
            width + 2.0 * TOOLTIP_PADDING_PX,
            height + 2.0 * TOOLTIP_PADDING_PX,
            fill(palette.tooltip_background),
            stroke(palette.tooltip_border, 1.0),
        )?;
        for line in &tooltip.lines {
            writeln!(
                out,
                r#"    <text x="{}" y="{}" dominant-baseline="hanging" font-size="{}" {}>{}</text>"#,
                line.x,
                line.y,
                palette.font_size_px,
                fill(palette.tooltip_text),
                escape(&line.text),
            )?;
        }
        writeln!(out, "  </g>")
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;
        self.document = self
            .write_document(scene)
            .map_err(|err| ChartError::Backend(format!("failed to write svg: {err}")))?;
        Ok(())
    }
}

fn fill(color: Color) -> String {
    format!(r#"fill="{}" fill-opacity="{}""#, color.to_hex(), color.alpha)
}

fn stroke(color: Color, width: f64) -> String {
    format!(
        r#"stroke="{}" stroke-opacity="{}" stroke-width="{width}""#,
        color.to_hex(),
        color.alpha
    )
}

fn class_name(class: CandleClass) -> &'static str {
    match class {
        CandleClass::Bull => "bull",
        CandleClass::Bear => "bear",
    }
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Price => "price",
        Axis::Time => "time",
    }
}

fn anchor_name(align: TextHAlign) -> &'static str {
    match align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
