//! Technical indicators for daily close analysis.
//!
//! - **RSI**: Relative Strength Index with Wilder smoothing
//! - **EMA**: Exponential Moving Average
//! - **MACD**: Moving Average Convergence Divergence
//! - **SMA**: trailing Simple Moving Average

mod moving_average;
mod rsi;

pub use moving_average::{ema, trailing_mean};
pub use rsi::rsi;

use crate::{Error, Result};

/// Default RSI lookback.
pub const RSI_PERIOD: usize = 14;
/// Default MACD fast EMA span.
pub const MACD_FAST: usize = 12;
/// Default MACD slow EMA span.
pub const MACD_SLOW: usize = 26;
/// Default MACD signal EMA span.
pub const MACD_SIGNAL: usize = 9;
/// Window of the reported simple moving average.
pub const SMA_WINDOW: usize = 20;

/// Reject NaN and infinite inputs before they poison a running average.
pub(crate) fn ensure_finite(indicator: &str, data: &[f64]) -> Result<()> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(Error::InvalidNumericInput(format!(
            "{} input at index {} is not finite: {}",
            indicator, idx, data[idx]
        ))),
        None => Ok(()),
    }
}

/// MACD (Moving Average Convergence Divergence) result.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    /// MACD line (fast EMA - slow EMA)
    pub macd_line: Vec<f64>,
    /// Signal line (EMA of MACD line)
    pub signal_line: Vec<f64>,
    /// Histogram (MACD - Signal)
    pub histogram: Vec<f64>,
}

/// Calculate MACD indicator.
///
/// Any non-empty series is accepted; with short input the early values are
/// simply less meaningful.
///
/// # Arguments
///
/// * `data` - Price series
/// * `fast_period` - Fast EMA span (typically 12)
/// * `slow_period` - Slow EMA span (typically 26)
/// * `signal_period` - Signal line EMA span (typically 9)
///
/// # Returns
///
/// MACD with macd_line, signal_line, and histogram, each aligned with `data`.
///
/// # Example
///
/// ```rust
/// use pulse_core::indicators::{macd, MACD_FAST, MACD_SIGNAL, MACD_SLOW};
///
/// let prices = vec![10.0, 10.5, 11.0, 10.8];
/// let result = macd(&prices, MACD_FAST, MACD_SLOW, MACD_SIGNAL).unwrap();
///
/// // Both EMAs start at the first price
/// assert_eq!(result.macd_line[0], 0.0);
/// assert_eq!(result.signal_line.len(), prices.len());
/// ```
pub fn macd(
    data: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<Macd> {
    if data.is_empty() {
        return Err(Error::InsufficientHistory {
            indicator: "MACD",
            required: 1,
            available: 0,
        });
    }
    ensure_finite("MACD", data)?;

    let fast_ema = ema(data, fast_period)?;
    let slow_ema = ema(data, slow_period)?;

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(fast, slow)| fast - slow)
        .collect();

    let signal_line = ema(&macd_line, signal_period)?;

    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    Ok(Macd {
        macd_line,
        signal_line,
        histogram,
    })
}
