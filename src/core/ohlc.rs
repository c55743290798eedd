use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// Display label of one interval, either numeric or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateLabel {
    Number(f64),
    Text(String),
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for DateLabel {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for DateLabel {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for DateLabel {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DateLabel {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Whether a candle closed above its open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandleClass {
    Bull,
    Bear,
}

/// One OHLC interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    pub date: DateLabel,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcPoint {
    /// Builds a validated OHLC point.
    ///
    /// Invariants:
    /// - all prices are finite
    /// - `low <= min(open, close) <= max(open, close) <= high`
    pub fn new(
        date: impl Into<DateLabel>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> ChartResult<Self> {
        let point = Self {
            date: date.into(),
            open,
            high,
            low,
            close,
        };
        point.validate()?;
        Ok(point)
    }

    /// Converts decimal prices into a validated OHLC point.
    pub fn from_decimal(
        date: impl Into<DateLabel>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            date,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.open.is_finite()
            || !self.high.is_finite()
            || !self.low.is_finite()
            || !self.close.is_finite()
        {
            return Err(ChartError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }

        if self.low > self.high {
            return Err(ChartError::InvalidData(
                "ohlc low must be <= high".to_owned(),
            ));
        }

        if self.open < self.low
            || self.open > self.high
            || self.close < self.low
            || self.close > self.high
        {
            return Err(ChartError::InvalidData(
                "ohlc open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(())
    }

    /// Bull when the price rose over the interval (`open < close`).
    ///
    /// Unchanged intervals (`open == close`) count as bear.
    #[must_use]
    pub fn class(&self) -> CandleClass {
        if self.open < self.close {
            CandleClass::Bull
        } else {
            CandleClass::Bear
        }
    }

    #[must_use]
    pub fn body_high(&self) -> f64 {
        self.open.max(self.close)
    }

    #[must_use]
    pub fn body_low(&self) -> f64 {
        self.open.min(self.close)
    }
}

/// Ordered series of validated OHLC points in display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OhlcSeries {
    #[serde(default)]
    pub title: Option<String>,
    pub points: Vec<OhlcPoint>,
}

impl OhlcSeries {
    pub fn new(points: Vec<OhlcPoint>) -> ChartResult<Self> {
        let series = Self {
            title: None,
            points,
        };
        series.validate()?;
        Ok(series)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Checks every point invariant; an empty series has nothing to draw.
    pub fn validate(&self) -> ChartResult<()> {
        if self.points.is_empty() {
            return Err(ChartError::InvalidData(
                "series must contain at least one candle".to_owned(),
            ));
        }
        for (index, point) in self.points.iter().enumerate() {
            point.validate().map_err(|err| match err {
                ChartError::InvalidData(message) => {
                    ChartError::InvalidData(format!("row {index}: {message}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Column-oriented wire format: parallel `date/open/high/low/close` arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OhlcRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub date: Vec<DateLabel>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl OhlcRecord {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse ohlc record: {e}")))
    }

    /// Zips the columns into a validated series.
    pub fn into_series(self) -> ChartResult<OhlcSeries> {
        let expected = self.date.len();
        for (name, len) in [
            ("open", self.open.len()),
            ("high", self.high.len()),
            ("low", self.low.len()),
            ("close", self.close.len()),
        ] {
            if len != expected {
                return Err(ChartError::InvalidData(format!(
                    "column `{name}` has {len} values, expected {expected}"
                )));
            }
        }

        let points = self
            .date
            .into_iter()
            .zip(self.open)
            .zip(self.high)
            .zip(self.low)
            .zip(self.close)
            .map(|((((date, open), high), low), close)| OhlcPoint {
                date,
                open,
                high,
                low,
                close,
            })
            .collect();

        let series = OhlcSeries {
            title: self.title,
            points,
        };
        series.validate()?;
        Ok(series)
    }
}

impl From<&OhlcSeries> for OhlcRecord {
    fn from(series: &OhlcSeries) -> Self {
        let mut record = Self {
            title: series.title.clone(),
            ..Self::default()
        };
        for point in &series.points {
            record.date.push(point.date.clone());
            record.open.push(point.open);
            record.high.push(point.high);
            record.low.push(point.low);
            record.close.push(point.close);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rust_decimal::Decimal;

    use super::{CandleClass, DateLabel, OhlcPoint, OhlcRecord, OhlcSeries};

    #[test]
    fn point_rejects_open_outside_range() {
        let err = OhlcPoint::new(0_i64, 5.0, 4.0, 1.0, 2.0).expect_err("open above high");
        assert!(err.to_string().contains("within low/high"));
    }

    #[test]
    fn point_rejects_nan() {
        assert!(OhlcPoint::new(0_i64, f64::NAN, 4.0, 1.0, 2.0).is_err());
    }

    #[test]
    fn doji_is_bear() {
        let point = OhlcPoint::new("d", 2.0, 3.0, 1.0, 2.0).expect("valid");
        assert_eq!(point.class(), CandleClass::Bear);
    }

    #[test]
    fn record_reports_short_column() {
        let record = OhlcRecord {
            title: None,
            date: vec![DateLabel::from(1_i64), DateLabel::from(2_i64)],
            open: vec![1.0, 2.0],
            high: vec![2.0, 3.0],
            low: vec![0.5],
            close: vec![1.5, 2.5],
        };
        let err = record.into_series().expect_err("short low column");
        assert!(err.to_string().contains("column `low` has 1 values, expected 2"));
    }

    #[test]
    fn record_reports_offending_row() {
        let record = OhlcRecord {
            title: None,
            date: vec![DateLabel::from(1_i64), DateLabel::from(2_i64)],
            open: vec![1.0, 2.0],
            high: vec![2.0, 3.0],
            low: vec![0.5, 2.5],
            close: vec![1.5, 2.5],
        };
        let err = record.into_series().expect_err("row 1 open below low");
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn decimal_prices_convert_to_point() {
        let point = OhlcPoint::from_decimal(
            "2024-03-01",
            Decimal::new(270, 2),
            Decimal::new(32, 1),
            Decimal::ONE,
            Decimal::new(16, 1),
        )
        .expect("decimal point");
        assert_relative_eq!(point.open, 2.7, epsilon = 1e-12);
        assert_relative_eq!(point.high, 3.2, epsilon = 1e-12);
        assert_eq!(point.low, 1.0);
        assert_relative_eq!(point.close, 1.6, epsilon = 1e-12);
        assert_eq!(point.class(), CandleClass::Bear);
    }

    #[test]
    fn decimal_prices_are_still_validated() {
        let err = OhlcPoint::from_decimal(
            0_i64,
            Decimal::new(5, 0),
            Decimal::new(4, 0),
            Decimal::ONE,
            Decimal::new(2, 0),
        )
        .expect_err("open above high");
        assert!(err.to_string().contains("within low/high"));
    }

    #[test]
    fn series_survives_record_json() {
        let series = OhlcSeries::new(vec![
            OhlcPoint::new(1_i64, 2.7, 3.2, 1.0, 1.6).expect("p0"),
            OhlcPoint::new("Tue", 2.0, 4.9, 2.0, 4.0).expect("p1"),
        ])
        .expect("series")
        .with_title("session");

        let record = OhlcRecord::from(&series);
        assert_eq!(record.title.as_deref(), Some("session"));
        assert_eq!(record.close, vec![1.6, 4.0]);

        let json = serde_json::to_string(&record).expect("serialize record");
        let restored = OhlcRecord::from_json_str(&json)
            .expect("parse record")
            .into_series()
            .expect("rebuild series");
        assert_eq!(restored, series);
    }

    #[test]
    fn integral_dates_display_without_fraction() {
        assert_eq!(DateLabel::from(3_i64).to_string(), "3");
        assert_eq!(DateLabel::from(2.5).to_string(), "2.5");
        assert_eq!(DateLabel::from("2024-01-02").to_string(), "2024-01-02");
    }
}
