use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Palette, Renderer, Scene, Shape, TextHAlign, Tooltip};

const TOOLTIP_PADDING_PX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, scene: &Scene) -> ChartResult<()>;
}

/// Cairo + Pango renderer drawing scenes into an offscreen image surface.
///
/// The surface is recreated whenever a scene's extent differs from it, so a
/// resized container needs no extra bookkeeping.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    palette: Palette,
    show_tooltips: bool,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32, palette: Palette) -> ChartResult<Self> {
        palette.validate()?;
        Ok(Self {
            surface: create_surface(width, height)?,
            palette,
            show_tooltips: false,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Static images have no hover, so tooltips are only drawn on request.
    pub fn set_show_tooltips(&mut self, show: bool) {
        self.show_tooltips = show;
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|err| {
            ChartError::Backend(format!("failed to create `{}`: {err}", path.display()))
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;
        let palette = self.palette;

        apply_color(context, palette.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for shape in &scene.shapes {
            match shape {
                Shape::GridLine { segment, .. } => {
                    apply_color(context, palette.grid);
                    context.set_line_width(palette.grid_width_px);
                    context.move_to(segment.x1, segment.y1);
                    context.line_to(segment.x2, segment.y2);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke grid line", err))?;
                    stats.lines_drawn += 1;
                }
                Shape::Wick { class, segment, .. } => {
                    apply_color(context, palette.wick(*class));
                    context.set_line_width(palette.wick_width_px);
                    context.move_to(segment.x1, segment.y1);
                    context.line_to(segment.x2, segment.y2);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke wick", err))?;
                    stats.lines_drawn += 1;
                }
                Shape::CandleBody { class, rect, .. } => {
                    context.rectangle(rect.x, rect.y, rect.width, rect.height);
                    apply_color(context, palette.body(*class));
                    if palette.border_width_px > 0.0 {
                        context
                            .fill_preserve()
                            .map_err(|err| map_backend_error("failed to fill body", err))?;
                        apply_color(context, palette.border(*class));
                        context.set_line_width(palette.border_width_px);
                        context
                            .stroke()
                            .map_err(|err| map_backend_error("failed to stroke body", err))?;
                    } else {
                        context
                            .fill()
                            .map_err(|err| map_backend_error("failed to fill body", err))?;
                    }
                    stats.rects_drawn += 1;
                }
                Shape::TickLabel {
                    text, x, y, align, ..
                } => {
                    let layout = pangocairo::functions::create_layout(context);
                    layout.set_font_description(Some(&font(palette.font_size_px)));
                    layout.set_text(text);
                    let (text_width, text_height) = layout.pixel_size();
                    let left = match align {
                        TextHAlign::Left => *x,
                        TextHAlign::Center => x - f64::from(text_width) / 2.0,
                        TextHAlign::Right => x - f64::from(text_width),
                    };
                    apply_color(context, palette.label);
                    context.move_to(left, y - f64::from(text_height) / 2.0);
                    pangocairo::functions::show_layout(context, &layout);
                    stats.texts_drawn += 1;
                }
            }
        }

        if self.show_tooltips {
            for tooltip in &scene.tooltips {
                draw_tooltip(context, &palette, tooltip, &mut stats)?;
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        let width = i32::try_from(scene.extent.width)
            .map_err(|_| ChartError::Backend("scene too wide for cairo".to_owned()))?;
        let height = i32::try_from(scene.extent.height)
            .map_err(|_| ChartError::Backend("scene too tall for cairo".to_owned()))?;
        if self.surface.width() != width || self.surface.height() != height {
            self.surface = create_surface(width, height)?;
        }

        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, scene)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, scene: &Scene) -> ChartResult<()> {
        self.render_with_context(context, scene)
    }
}

fn draw_tooltip(
    context: &Context,
    palette: &Palette,
    tooltip: &Tooltip,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    let Some(first) = tooltip.lines.first() else {
        return Ok(());
    };

    let mut layouts = Vec::with_capacity(tooltip.lines.len());
    let mut widest = 0_i32;
    let mut bottom = first.y;
    for line in &tooltip.lines {
        let layout = pangocairo::functions::create_layout(context);
        layout.set_font_description(Some(&font(palette.font_size_px)));
        layout.set_text(&line.text);
        let (width, height) = layout.pixel_size();
        widest = widest.max(width);
        bottom = bottom.max(line.y + f64::from(height));
        layouts.push((line, layout));
    }

    context.rectangle(
        first.x - TOOLTIP_PADDING_PX,
        first.y - TOOLTIP_PADDING_PX,
        f64::from(widest) + 2.0 * TOOLTIP_PADDING_PX,
        bottom - first.y + 2.0 * TOOLTIP_PADDING_PX,
    );
    apply_color(context, palette.tooltip_background);
    context
        .fill_preserve()
        .map_err(|err| map_backend_error("failed to fill tooltip", err))?;
    apply_color(context, palette.tooltip_border);
    context.set_line_width(1.0);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke tooltip", err))?;
    stats.rects_drawn += 1;

    apply_color(context, palette.tooltip_text);
    for (line, layout) in layouts {
        context.move_to(line.x, line.y);
        pangocairo::functions::show_layout(context, &layout);
        stats.texts_drawn += 1;
    }
    Ok(())
}

fn create_surface(width: i32, height: i32) -> ChartResult<ImageSurface> {
    if width <= 0 || height <= 0 {
        return Err(ChartError::Backend(
            "cairo surface size must be > 0".to_owned(),
        ));
    }
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn font(size_px: f64) -> FontDescription {
    FontDescription::from_string(&format!("Sans {size_px}"))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
