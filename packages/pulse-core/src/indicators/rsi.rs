//! Relative Strength Index (RSI) indicator.

use super::ensure_finite;
use crate::{Error, Result};

/// RSI from smoothed average gain and loss.
///
/// A zero average loss yields a ratio of 0 rather than infinity, so a window
/// with no losses reads as RSI 0, not 100.
#[inline]
fn rsi_value(avg_up: f64, avg_down: f64) -> f64 {
    let rs = if avg_down != 0.0 {
        avg_up / avg_down
    } else {
        0.0
    };
    100.0 - 100.0 / (1.0 + rs)
}

/// Finite prices can still overflow the running sums when they span most of
/// the `f64` range.
fn ensure_averages_finite(avg_up: f64, avg_down: f64, index: usize) -> Result<()> {
    if avg_up.is_finite() && avg_down.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidNumericInput(format!(
            "price changes overflow the RSI averages at index {}",
            index
        )))
    }
}

/// Calculate the Wilder-smoothed Relative Strength Index.
///
/// Seeding and smoothing:
/// 1. Price changes `delta[i] = prices[i+1] - prices[i]`
/// 2. Seed averages are the plain means of gains and losses over the first
///    `period` changes
/// 3. Outputs `0..period` all carry the seed RSI
/// 4. Output `i >= period` applies Wilder's update
///    `avg = (avg * (period - 1) + current) / period` with `delta[i - 1]`,
///    so the first update re-uses the last seed change
///
/// # Arguments
///
/// * `prices` - Closing prices, oldest first
/// * `period` - Lookback period (typically 14)
///
/// # Returns
///
/// One RSI value per price (0-100 scale). Fails with
/// [`Error::InsufficientHistory`] unless there are more than `period` prices.
///
/// # Example
///
/// ```rust
/// use pulse_core::indicators::rsi;
///
/// let prices = vec![44.0, 44.25, 44.5, 43.75, 44.5, 44.25, 44.5, 44.0, 43.5, 44.0,
///                   44.25, 44.0, 43.5, 44.0, 44.5, 44.25, 44.0];
/// let rsi_values = rsi(&prices, 14).unwrap();
///
/// assert_eq!(rsi_values.len(), prices.len());
/// for &value in &rsi_values {
///     assert!(value >= 0.0 && value <= 100.0);
/// }
///
/// // Too little history is an error, not a skewed value
/// assert!(rsi(&prices[..14], 14).is_err());
/// ```
pub fn rsi(prices: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(Error::InvalidParameter(
            "RSI period must be positive".to_string(),
        ));
    }

    let n = prices.len();
    if n <= period {
        return Err(Error::InsufficientHistory {
            indicator: "RSI",
            required: period + 1,
            available: n,
        });
    }
    ensure_finite("RSI", prices)?;

    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let seed = &deltas[..period];
    let p = period as f64;

    let mut avg_up = seed.iter().filter(|&&d| d >= 0.0).sum::<f64>() / p;
    let mut avg_down = -seed.iter().filter(|&&d| d < 0.0).sum::<f64>() / p;
    ensure_averages_finite(avg_up, avg_down, period)?;

    let mut result = vec![rsi_value(avg_up, avg_down); n];

    for i in period..n {
        let delta = deltas[i - 1];
        let (upval, downval) = if delta > 0.0 { (delta, 0.0) } else { (0.0, -delta) };

        avg_up = (avg_up * (p - 1.0) + upval) / p;
        avg_down = (avg_down * (p - 1.0) + downval) / p;
        ensure_averages_finite(avg_up, avg_down, i)?;

        result[i] = rsi_value(avg_up, avg_down);
    }

    Ok(result)
}
