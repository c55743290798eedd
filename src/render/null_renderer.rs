use crate::error::ChartResult;
use crate::render::{Renderer, Scene};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates every scene so invalid geometry surfaces without a real
/// drawing surface.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_shape_count: usize,
    pub last_tooltip_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;
        self.frames_rendered += 1;
        self.last_shape_count = scene.shapes.len();
        self.last_tooltip_count = scene.tooltips.len();
        Ok(())
    }
}
