//! Pulse Core - RSI/MACD analysis of daily closing prices.
//!
//! This crate turns an ordered series of daily closes into an indicator report:
//!
//! - **Indicators**: Wilder-smoothed RSI, MACD with signal line, EMA, trailing SMA
//! - **Signal**: three-way Buy/Hold/Sell recommendation from the latest RSI
//! - **Report**: the snapshot handed to a delivery layer (JSON, CLI, ...)
//! - **Sources**: the seam for whatever supplies prices, plus a file-backed one
//!
//! # Example
//!
//! ```rust
//! use pulse_core::{analyze, PriceSeries, Recommendation};
//!
//! // 20 strictly increasing closes, one per day
//! let day = 86_400_000;
//! let records: Vec<(i64, f64)> = (0..20)
//!     .map(|i| (1_672_617_600_000 + i * day, 10.0 + i as f64))
//!     .collect();
//!
//! let series = PriceSeries::from_records(&records).unwrap();
//! let report = analyze("aapl", &series).unwrap();
//!
//! assert_eq!(report.symbol, "AAPL");
//! assert_eq!(report.moving_average_20, 19.5);
//! // No losses at all: the zero-loss ratio is taken as 0, pinning RSI at 0
//! assert_eq!(report.rsi, 0.0);
//! assert_eq!(report.recommendation, Recommendation::Buy);
//! ```

pub mod config;
pub mod indicators;
pub mod report;
pub mod signal;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use types::{ApiResponse, IndicatorReport, PricePoint, PriceSeries, Recommendation};

// Re-export main functionality
pub use indicators::{ema, macd, rsi, trailing_mean, Macd};
pub use report::{analyze, round2};
pub use signal::classify;
pub use source::{Aggregates, DirectorySource, PriceSource};

/// Error types for pulse-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    MissingInput(String),

    #[error("{0}")]
    UpstreamFailure(String),

    #[error("insufficient history for {indicator}: need at least {required} prices, got {available}")]
    InsufficientHistory {
        indicator: &'static str,
        required: usize,
        available: usize,
    },

    #[error("Invalid numeric input: {0}")]
    InvalidNumericInput(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Stable tag for the failure, suitable for a delivery layer's error payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingInput(_) => "missing_input",
            Error::UpstreamFailure(_) => "upstream_failure",
            Error::InsufficientHistory { .. } => "insufficient_history",
            Error::InvalidNumericInput(_) => "invalid_numeric_input",
            Error::InvalidParameter(_) => "invalid_parameter",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Config(_) => "config",
        }
    }

    /// Whether the failure is attributable to the request rather than the host.
    ///
    /// Domain failures (bad symbol, short history, unusable prices, upstream
    /// returning nothing) are client errors; I/O, JSON and configuration
    /// problems on the serving side are not.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Json(_) | Error::Config(_))
    }
}

/// Result type for pulse-core operations.
pub type Result<T> = std::result::Result<T, Error>;
