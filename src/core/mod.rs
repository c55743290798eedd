pub mod candlestick;
pub mod ohlc;
pub mod primitives;
pub mod scale;
pub mod ticks;
pub mod types;
pub mod value_range;

pub use candlestick::{CandleGeometry, DEFAULT_WIDTH_SCALE, project_candles};
pub use ohlc::{CandleClass, DateLabel, OhlcPoint, OhlcRecord, OhlcSeries};
pub use scale::{ScaleMapper, index_to_x, price_to_y};
pub use ticks::{
    DEFAULT_MIN_SPACING_PX, PriceTick, PriceTicks, TimeTick, TimeTicks, nice_step,
    select_price_ticks, select_time_ticks,
};
pub use types::Viewport;
pub use value_range::ValueRange;
