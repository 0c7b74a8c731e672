//! RSI threshold classification.

use crate::types::Recommendation;
use crate::{Error, Result};

/// RSI strictly below this is oversold.
pub const OVERSOLD: f64 = 30.0;
/// RSI strictly above this is overbought.
pub const OVERBOUGHT: f64 = 70.0;

/// Map the latest RSI value to a recommendation.
///
/// Thresholds are strict, so exactly 30 or 70 is a hold. NaN is rejected
/// instead of falling through to [`Recommendation::Hold`].
///
/// # Example
///
/// ```rust
/// use pulse_core::{classify, Recommendation};
///
/// assert_eq!(classify(29.99).unwrap(), Recommendation::Buy);
/// assert_eq!(classify(30.0).unwrap(), Recommendation::Hold);
/// assert_eq!(classify(70.01).unwrap(), Recommendation::Sell);
/// assert!(classify(f64::NAN).is_err());
/// ```
pub fn classify(latest_rsi: f64) -> Result<Recommendation> {
    if latest_rsi.is_nan() {
        return Err(Error::InvalidNumericInput(
            "cannot classify a NaN RSI".to_string(),
        ));
    }

    Ok(if latest_rsi < OVERSOLD {
        Recommendation::Buy
    } else if latest_rsi > OVERBOUGHT {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(29.99).unwrap(), Recommendation::Buy);
        assert_eq!(classify(30.0).unwrap(), Recommendation::Hold);
        assert_eq!(classify(70.0).unwrap(), Recommendation::Hold);
        assert_eq!(classify(70.01).unwrap(), Recommendation::Sell);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(0.0).unwrap(), Recommendation::Buy);
        assert_eq!(classify(50.0).unwrap(), Recommendation::Hold);
        assert_eq!(classify(100.0).unwrap(), Recommendation::Sell);
        // Total over the reals, including out-of-range values
        assert_eq!(classify(f64::NEG_INFINITY).unwrap(), Recommendation::Buy);
        assert_eq!(classify(f64::INFINITY).unwrap(), Recommendation::Sell);
    }

    #[test]
    fn test_classify_nan() {
        let err = classify(f64::NAN).unwrap_err();
        assert!(matches!(err, Error::InvalidNumericInput(_)));
    }
}
