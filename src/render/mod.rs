mod null_renderer;
mod primitives;
mod scene;
mod svg;

pub use null_renderer::NullRenderer;
pub use primitives::{Color, Palette};
pub use scene::{
    Axis, Rect, SCENE_JSON_SCHEMA_V1, Scene, SceneJsonContractV1, Segment, Shape, ShapeClass,
    TextHAlign, Tooltip, TooltipLine, WickPart,
};
pub use svg::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully resolved, deterministic `Scene`; styling and
/// interaction live here, never in layout.
pub trait Renderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
