//! Price sources.
//!
//! The indicator core never fetches prices itself. Whatever supplies them
//! implements [`PriceSource`]; [`DirectorySource`] reads saved daily
//! aggregate-bar responses from disk.

use crate::config::Config;
use crate::types::PriceSeries;
use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies the daily closes for a symbol.
pub trait PriceSource {
    /// Load the price series for `symbol`.
    fn load(&self, symbol: &str) -> Result<PriceSeries>;
}

/// One daily bar from a market-data aggregates response.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct AggregateBar {
    /// Bar start, epoch milliseconds
    #[serde(rename = "t")]
    pub timestamp: i64,
    /// Closing price
    #[serde(rename = "c")]
    pub close: f64,
}

/// A market-data aggregates response: `{"results": [{"t": ..., "c": ...}, ...]}`.
///
/// Other fields in the payload are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Aggregates {
    #[serde(default)]
    pub results: Option<Vec<AggregateBar>>,
}

impl Aggregates {
    /// Parse a response body.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pulse_core::Aggregates;
    ///
    /// let body = r#"{"ticker":"AAPL","status":"OK",
    ///     "results":[{"t":1672704000000,"c":125.07,"v":112117471}]}"#;
    /// let series = Aggregates::from_json(body).unwrap().into_series().unwrap();
    /// assert_eq!(series.closes(), vec![125.07]);
    /// ```
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| Error::UpstreamFailure(format!("Failed to fetch data: {}", e)))
    }

    /// Read and parse a saved response.
    pub fn from_path(path: &Path) -> Result<Self> {
        let body = fs::read_to_string(path).map_err(|e| {
            Error::UpstreamFailure(format!("Failed to fetch data from {}: {}", path.display(), e))
        })?;
        Self::from_json(&body)
    }

    /// Validate the bars into a [`PriceSeries`].
    pub fn into_series(self) -> Result<PriceSeries> {
        let bars = match self.results {
            Some(bars) if !bars.is_empty() => bars,
            _ => return Err(Error::UpstreamFailure("No data found".to_string())),
        };

        let records: Vec<(i64, f64)> = bars.iter().map(|b| (b.timestamp, b.close)).collect();
        PriceSeries::from_records(&records)
    }
}

/// Reads `<dir>/<SYMBOL>.json` aggregate responses.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a source rooted at the configured data directory.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_dir.clone())
    }

    /// The directory being read.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the saved response for `symbol`.
    ///
    /// Symbols that could escape the data directory are rejected.
    pub fn path_for(&self, symbol: &str) -> Result<PathBuf> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(Error::MissingInput("No symbol provided".to_string()));
        }
        if symbol.contains(['/', '\\']) || symbol.contains("..") {
            return Err(Error::InvalidParameter(format!("invalid symbol: {}", symbol)));
        }
        Ok(self.dir.join(format!("{}.json", symbol.to_uppercase())))
    }
}

impl PriceSource for DirectorySource {
    fn load(&self, symbol: &str) -> Result<PriceSeries> {
        let path = self.path_for(symbol)?;
        tracing::debug!(path = %path.display(), "Loading aggregates");

        let series = Aggregates::from_path(&path)?.into_series()?;
        tracing::debug!(symbol = symbol, closes = series.len(), "Loaded price series");
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BODY: &str = r#"{
        "ticker": "AAPL",
        "queryCount": 3,
        "resultsCount": 3,
        "adjusted": true,
        "results": [
            {"v": 1.0, "vw": 1.0, "o": 1.0, "c": 125.07, "h": 1.0, "l": 1.0, "t": 1672704000000, "n": 1},
            {"v": 1.0, "vw": 1.0, "o": 1.0, "c": 126.36, "h": 1.0, "l": 1.0, "t": 1672790400000, "n": 1},
            {"v": 1.0, "vw": 1.0, "o": 1.0, "c": 125.02, "h": 1.0, "l": 1.0, "t": 1672876800000, "n": 1}
        ],
        "status": "OK"
    }"#;

    #[test]
    fn test_parse_aggregates() {
        let series = Aggregates::from_json(BODY).unwrap().into_series().unwrap();
        assert_eq!(series.closes(), vec![125.07, 126.36, 125.02]);
        assert_eq!(series.dates(), vec!["2023-01-03", "2023-01-04", "2023-01-05"]);
    }

    #[test]
    fn test_no_data_found() {
        for body in [r#"{"status":"OK"}"#, r#"{"results":[]}"#] {
            let err = Aggregates::from_json(body)
                .unwrap()
                .into_series()
                .unwrap_err();
            assert_eq!(err.to_string(), "No data found");
        }
    }

    #[test]
    fn test_malformed_body() {
        let err = Aggregates::from_json("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, Error::UpstreamFailure(_)));
        assert!(err.to_string().starts_with("Failed to fetch data"));
    }

    #[test]
    fn test_unordered_bars_rejected() {
        let body = r#"{"results":[{"t":1672790400000,"c":2.0},{"t":1672704000000,"c":1.0}]}"#;
        let err = Aggregates::from_json(body)
            .unwrap()
            .into_series()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidNumericInput(_)));
    }

    #[test]
    fn test_directory_source() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("AAPL.json"), BODY).unwrap();

        let source = DirectorySource::new(dir.path());
        let series = source.load("aapl").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(source.path_for(" aapl ").unwrap(), dir.path().join("AAPL.json"));
        assert_eq!(source.path_for("brk.b").unwrap(), dir.path().join("BRK.B.json"));
    }

    #[test]
    fn test_directory_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path());

        let err = source.load("NOPE").unwrap_err();
        assert!(matches!(err, Error::UpstreamFailure(_)));
        assert!(err.to_string().starts_with("Failed to fetch data"));
    }

    #[test]
    fn test_directory_source_rejects_escaping_symbols() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SECRET.json"), BODY).unwrap();
        let source = DirectorySource::new(dir.path().join("data"));

        for symbol in ["../SECRET", "..\\SECRET", "a/b", "..", "/etc/passwd"] {
            let err = source.load(symbol).unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter(_)),
                "accepted {symbol}: {err:?}"
            );
        }
    }

    #[test]
    fn test_directory_source_blank_symbol() {
        let dir = TempDir::new().unwrap();
        let err = DirectorySource::new(dir.path()).load("").unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
    }
}
