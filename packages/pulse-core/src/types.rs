//! Core data types for the pulse indicator pipeline.

use crate::signal::classify;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Trading day (UTC)
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// Create a price point from an epoch-millisecond timestamp.
    ///
    /// The date is the UTC calendar day containing the timestamp.
    pub fn from_timestamp_millis(timestamp_ms: i64, close: f64) -> Result<Self> {
        let date = DateTime::from_timestamp_millis(timestamp_ms)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| {
                Error::InvalidNumericInput(format!("timestamp out of range: {}", timestamp_ms))
            })?;
        Ok(Self::new(date, close))
    }
}

/// Ordered, validated sequence of daily closes.
///
/// Invariants upheld by every constructor:
/// - at least one point
/// - every close is finite and non-negative
/// - dates strictly ascending (no duplicates)
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from points already sorted by date.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::MissingInput("empty price series".to_string()));
        }

        for (i, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close < 0.0 {
                return Err(Error::InvalidNumericInput(format!(
                    "close at {} must be finite and non-negative, got {}",
                    point.date, point.close
                )));
            }
            if i > 0 && point.date <= points[i - 1].date {
                return Err(Error::InvalidNumericInput(format!(
                    "dates must be strictly ascending: {} follows {}",
                    point.date,
                    points[i - 1].date
                )));
            }
        }

        Ok(Self { points })
    }

    /// Build a series from `(epoch milliseconds, close)` records.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pulse_core::PriceSeries;
    ///
    /// let series = PriceSeries::from_records(&[
    ///     (1_672_704_000_000, 125.07),
    ///     (1_672_790_400_000, 126.36),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(series.dates(), vec!["2023-01-03", "2023-01-04"]);
    /// assert_eq!(series.latest_close(), 126.36);
    /// ```
    pub fn from_records(records: &[(i64, f64)]) -> Result<Self> {
        let mut points = Vec::with_capacity(records.len());

        for (i, &(timestamp_ms, close)) in records.iter().enumerate() {
            if i > 0 && timestamp_ms <= records[i - 1].0 {
                return Err(Error::InvalidNumericInput(format!(
                    "timestamps must be strictly ascending: {} follows {}",
                    timestamp_ms,
                    records[i - 1].0
                )));
            }
            points.push(PricePoint::from_timestamp_millis(timestamp_ms, close)?);
        }

        Self::new(points)
    }

    /// The underlying points.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of closes in the series.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed series; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Dates formatted as `YYYY-MM-DD`, aligned with [`closes`](Self::closes).
    pub fn dates(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect()
    }

    /// The most recent close.
    pub fn latest_close(&self) -> f64 {
        // Non-empty by construction
        self.points[self.points.len() - 1].close
    }
}

/// Trading recommendation derived from the latest RSI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recommendation {
    #[serde(rename = "Buy (Oversold)")]
    Buy,
    #[serde(rename = "Sell (Overbought)")]
    Sell,
    #[serde(rename = "Hold")]
    Hold,
}

impl Recommendation {
    /// Display label, as serialized.
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Buy => "Buy (Oversold)",
            Recommendation::Sell => "Sell (Overbought)",
            Recommendation::Hold => "Hold",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Point-in-time analysis of one symbol.
///
/// `rsi` and `moving_average_20` are rounded to two decimals for display;
/// the series fields keep full precision for charting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorReport {
    /// Ticker symbol (uppercase)
    pub symbol: String,
    /// Most recent close
    pub latest_price: f64,
    /// Final RSI value, rounded to 2 decimals
    pub rsi: f64,
    /// Mean of the trailing 20 closes, rounded to 2 decimals
    pub moving_average_20: f64,
    /// Recommendation from the final full-precision RSI
    pub recommendation: Recommendation,
    /// Trading days as `YYYY-MM-DD`
    pub dates: Vec<String>,
    /// Closing prices
    pub closes: Vec<f64>,
    /// RSI per close
    pub rsi_series: Vec<f64>,
    /// MACD line per close
    pub macd_line: Vec<f64>,
    /// Signal line per close
    pub signal_line: Vec<f64>,
}

impl IndicatorReport {
    /// Recompute the recommendation from the stored RSI series.
    pub fn reclassify(&self) -> Result<Recommendation> {
        let latest = self.rsi_series.last().copied().ok_or_else(|| {
            Error::MissingInput("report has an empty RSI series".to_string())
        })?;
        classify(latest)
    }
}

/// Response envelope for delivery layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    /// Create an error response carrying the error's tag.
    pub fn err(error: &Error) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.to_string()),
            kind: Some(error.kind().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    #[test]
    fn test_series_new() {
        let series =
            PriceSeries::new(vec![PricePoint::new(day(3), 10.0), PricePoint::new(day(4), 11.0)])
                .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![10.0, 11.0]);
        assert_eq!(series.latest_close(), 11.0);
    }

    #[test]
    fn test_series_rejects_empty() {
        let err = PriceSeries::new(vec![]).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
    }

    #[test]
    fn test_series_rejects_bad_closes() {
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let err = PriceSeries::new(vec![PricePoint::new(day(3), bad)]).unwrap_err();
            assert!(matches!(err, Error::InvalidNumericInput(_)));
        }
        // Zero is a legal close
        assert!(PriceSeries::new(vec![PricePoint::new(day(3), 0.0)]).is_ok());
    }

    #[test]
    fn test_series_rejects_unordered_dates() {
        let err =
            PriceSeries::new(vec![PricePoint::new(day(4), 10.0), PricePoint::new(day(3), 11.0)])
                .unwrap_err();
        assert!(matches!(err, Error::InvalidNumericInput(_)));

        let err =
            PriceSeries::new(vec![PricePoint::new(day(4), 10.0), PricePoint::new(day(4), 11.0)])
                .unwrap_err();
        assert!(matches!(err, Error::InvalidNumericInput(_)));
    }

    #[test]
    fn test_from_records_utc_dates() {
        // 2023-01-03T05:00:00Z and 2023-01-04T05:00:00Z
        let series =
            PriceSeries::from_records(&[(1_672_722_000_000, 1.0), (1_672_808_400_000, 2.0)])
                .unwrap();
        assert_eq!(series.dates(), vec!["2023-01-03", "2023-01-04"]);
    }

    #[test]
    fn test_from_records_rejects_non_monotonic() {
        let err = PriceSeries::from_records(&[(2_000, 1.0), (1_000, 2.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidNumericInput(_)));
    }

    #[test]
    fn test_from_records_rejects_out_of_range_timestamp() {
        let err = PriceSeries::from_records(&[(i64::MAX, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidNumericInput(_)));
        assert!(err.to_string().contains("timestamp out of range"));
    }

    #[test]
    fn test_from_records_rejects_same_day() {
        // Two timestamps one hour apart on the same UTC day
        let err = PriceSeries::from_records(&[(1_672_722_000_000, 1.0), (1_672_725_600_000, 2.0)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidNumericInput(_)));
    }

    #[test]
    fn test_recommendation_labels() {
        assert_eq!(Recommendation::Buy.to_string(), "Buy (Oversold)");
        assert_eq!(Recommendation::Sell.to_string(), "Sell (Overbought)");
        assert_eq!(
            serde_json::to_string(&Recommendation::Hold).unwrap(),
            "\"Hold\""
        );
        let parsed: Recommendation = serde_json::from_str("\"Sell (Overbought)\"").unwrap();
        assert_eq!(parsed, Recommendation::Sell);
    }

    #[test]
    fn test_api_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.ok);
        assert_eq!(response.data, Some("test".to_string()));

        let err = Error::UpstreamFailure("No data found".to_string());
        let err_response: ApiResponse<String> = ApiResponse::err(&err);
        assert!(!err_response.ok);
        assert_eq!(err_response.error, Some("No data found".to_string()));
        assert_eq!(err_response.kind, Some("upstream_failure".to_string()));
    }
}
