use tracing::{debug, warn};

use crate::core::{OhlcSeries, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Renderer, Scene};
use crate::source::DataSource;

use super::{LayoutConfig, layout_scene};

/// Host-facing chart: owns a series, a layout config and a rendering backend.
///
/// Every `draw` recomputes the scene from scratch; hosts call it on initial
/// load, data change and container resize. `draw` takes `&mut self`, so a host
/// that can trigger redraws from several threads wraps the chart in a `Mutex`.
pub struct CandleChart<R: Renderer> {
    renderer: R,
    config: LayoutConfig,
    series: Option<OhlcSeries>,
    last_scene: Option<Scene>,
}

impl<R: Renderer> CandleChart<R> {
    pub fn new(renderer: R, config: LayoutConfig) -> ChartResult<Self> {
        Ok(Self {
            renderer,
            config: config.validate()?,
            series: None,
            last_scene: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    pub fn set_config(&mut self, config: LayoutConfig) -> ChartResult<()> {
        self.config = config.validate()?;
        Ok(())
    }

    /// Replaces the series after validating it.
    pub fn set_series(&mut self, series: OhlcSeries) -> ChartResult<()> {
        series.validate()?;
        debug!(candles = series.len(), title = ?series.title, "set series");
        self.series = Some(series);
        Ok(())
    }

    /// Pulls a fresh series from `source`.
    ///
    /// Failures are surfaced unchanged and leave the current series in place;
    /// retry policy belongs to the caller.
    pub fn load_from<S: DataSource + ?Sized>(&mut self, source: &mut S) -> ChartResult<()> {
        let series = source.load().inspect_err(|err| {
            warn!(error = %err, "data source failed");
        })?;
        self.set_series(series)
    }

    #[must_use]
    pub fn series(&self) -> Option<&OhlcSeries> {
        self.series.as_ref()
    }

    /// Lays out the current series for `extent` and hands the scene to the renderer.
    ///
    /// Any failure discards the previous scene; the renderer never sees a
    /// partial scene.
    pub fn draw(&mut self, extent: Viewport) -> ChartResult<&Scene> {
        self.last_scene = None;
        let series = self
            .series
            .as_ref()
            .ok_or_else(|| ChartError::NoData("no series loaded".to_owned()))?;

        let scene = layout_scene(series, extent, &self.config).inspect_err(|err| {
            warn!(
                error = %err,
                width = extent.width,
                height = extent.height,
                "rejected draw"
            );
        })?;
        self.renderer.render(&scene)?;
        Ok(self.last_scene.insert(scene))
    }

    #[must_use]
    pub fn last_scene(&self) -> Option<&Scene> {
        self.last_scene.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
