use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel extent of a drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Fails with the "cannot render" error when either extent is zero.
    pub fn ensure_valid(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Removes a right-hand column and a bottom row reserved for axis labels.
    #[must_use]
    pub fn shrink(self, right_px: u32, bottom_px: u32) -> Self {
        Self {
            width: self.width.saturating_sub(right_px),
            height: self.height.saturating_sub(bottom_px),
        }
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}
