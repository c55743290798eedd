use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The container (after axis reservations) has no drawable area.
    #[error("cannot render: invalid container size width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("no data to render: {0}")]
    NoData(String),

    #[error("render backend failure: {0}")]
    Backend(String),
}

impl ChartError {
    /// Returns `true` for the fail-fast error raised on degenerate containers.
    #[must_use]
    pub fn is_cannot_render(&self) -> bool {
        matches!(self, Self::InvalidViewport { .. })
    }
}
