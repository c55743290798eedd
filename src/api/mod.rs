mod chart;
mod layout;
mod layout_config;
mod tooltip;

pub use chart::CandleChart;
pub use layout::layout_scene;
pub use layout_config::{DEFAULT_PRICE_AXIS_WIDTH_PX, DEFAULT_TIME_AXIS_HEIGHT_PX, LayoutConfig};
