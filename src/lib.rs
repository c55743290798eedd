//! candle-chart: candlestick chart layout.
//!
//! Maps an OHLC series onto a container's pixel extent, picks "nice" axis
//! ticks and resolves candle bodies, wicks, grid lines, labels and tooltips
//! into a renderer-agnostic [`render::Scene`]. Drawing is delegated to a
//! [`render::Renderer`] backend.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod source;
pub mod telemetry;

pub use api::{CandleChart, LayoutConfig, layout_scene};
pub use error::{ChartError, ChartResult};
