//! Indicator report assembly.

use crate::indicators::{
    macd, rsi, trailing_mean, MACD_FAST, MACD_SIGNAL, MACD_SLOW, RSI_PERIOD, SMA_WINDOW,
};
use crate::signal::classify;
use crate::types::{IndicatorReport, PriceSeries};
use crate::{Error, Result};

/// Round to two decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Analyze a price series for `symbol`.
///
/// Runs RSI(14), MACD(12/26/9) and the trailing 20-close SMA, then classifies
/// the final RSI. Fails when the symbol is blank or the series is too short
/// for RSI.
pub fn analyze(symbol: &str, series: &PriceSeries) -> Result<IndicatorReport> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(Error::MissingInput("No symbol provided".to_string()));
    }
    let symbol = symbol.to_uppercase();

    let closes = series.closes();

    let rsi_series = rsi(&closes, RSI_PERIOD).inspect_err(|e| {
        tracing::warn!(symbol = %symbol, closes = closes.len(), "RSI rejected: {}", e);
    })?;
    let latest_rsi = rsi_series[rsi_series.len() - 1];
    let recommendation = classify(latest_rsi)?;

    let moving_average = trailing_mean(&closes, SMA_WINDOW)?;
    let macd_result = macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL)?;

    tracing::debug!(
        symbol = %symbol,
        closes = closes.len(),
        rsi = latest_rsi,
        recommendation = %recommendation,
        "Assembled indicator report"
    );

    Ok(IndicatorReport {
        symbol,
        latest_price: series.latest_close(),
        rsi: round2(latest_rsi),
        moving_average_20: round2(moving_average),
        recommendation,
        dates: series.dates(),
        closes,
        rsi_series,
        macd_line: macd_result.macd_line,
        signal_line: macd_result.signal_line,
    })
}
