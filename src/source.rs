//! Data-source collaborators feeding series into a chart.
//!
//! Sources surface failures without retrying; retry and backoff policy is the
//! host's decision.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{OhlcRecord, OhlcSeries};
use crate::error::{ChartError, ChartResult};

/// Supplies one OHLC series per call.
pub trait DataSource {
    fn load(&mut self) -> ChartResult<OhlcSeries>;
}

impl<F> DataSource for F
where
    F: FnMut() -> ChartResult<OhlcSeries>,
{
    fn load(&mut self) -> ChartResult<OhlcSeries> {
        self()
    }
}

/// Reads a column-oriented JSON record (`{ "date": [...], "open": [...], ... }`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileSource {
    fn load(&mut self) -> ChartResult<OhlcSeries> {
        let raw = fs::read_to_string(&self.path).map_err(|err| {
            ChartError::NoData(format!("failed to read `{}`: {err}", self.path.display()))
        })?;
        let series = OhlcRecord::from_json_str(&raw)?.into_series()?;
        debug!(
            path = %self.path.display(),
            candles = series.len(),
            "loaded ohlc record"
        );
        Ok(series)
    }
}
