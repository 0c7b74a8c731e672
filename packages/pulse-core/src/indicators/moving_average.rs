//! Exponential and trailing simple moving averages.

use crate::{Error, Result};

/// Calculate Exponential Moving Average.
///
/// Uses the recursive form without bias correction:
/// `EMA[0] = data[0]`, `EMA[i] = alpha * data[i] + (1 - alpha) * EMA[i-1]`
/// where `alpha = 2 / (span + 1)`.
///
/// # Arguments
///
/// * `data` - Input series
/// * `span` - Span used to derive the smoothing factor
///
/// # Returns
///
/// Vector of EMA values, same length as `data`.
///
/// # Example
///
/// ```rust
/// use pulse_core::indicators::ema;
///
/// let prices = vec![10.0, 11.0, 12.0, 11.0, 10.0, 11.0, 12.0, 13.0, 12.0, 11.0];
/// let ema_values = ema(&prices, 3).unwrap();
///
/// assert_eq!(ema_values[0], 10.0);
/// // alpha = 0.5: EMA[1] = 0.5 * 11 + 0.5 * 10
/// assert_eq!(ema_values[1], 10.5);
/// ```
pub fn ema(data: &[f64], span: usize) -> Result<Vec<f64>> {
    if span == 0 {
        return Err(Error::InvalidParameter("EMA span must be positive".to_string()));
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut result = Vec::with_capacity(data.len());

    for (i, &value) in data.iter().enumerate() {
        let next = if i == 0 {
            value
        } else {
            value * alpha + result[i - 1] * (1.0 - alpha)
        };
        result.push(next);
    }

    Ok(result)
}

/// Mean of the trailing `window` values.
///
/// When fewer than `window` values exist, averages over all of them.
///
/// # Example
///
/// ```rust
/// use pulse_core::indicators::trailing_mean;
///
/// assert_eq!(trailing_mean(&[1.0, 2.0, 3.0, 4.0], 2).unwrap(), 3.5);
/// // Short input averages everything available
/// assert_eq!(trailing_mean(&[1.0, 2.0, 3.0], 20).unwrap(), 2.0);
/// ```
pub fn trailing_mean(data: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(Error::InvalidParameter(
            "moving average window must be positive".to_string(),
        ));
    }
    if data.is_empty() {
        return Err(Error::InsufficientHistory {
            indicator: "SMA",
            required: 1,
            available: 0,
        });
    }

    let tail = &data[data.len().saturating_sub(window)..];
    Ok(tail.iter().sum::<f64>() / tail.len() as f64)
}
