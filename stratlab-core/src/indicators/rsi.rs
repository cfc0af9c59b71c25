//! Relative Strength Index (RSI).
//!
//! Rolling simple mean of gains and losses over `period` changes.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge cases: avg_loss == 0 → 100; avg_gain == 0 → 0; both zero → NaN
//! (a flat window carries no strength information).

use crate::domain::PriceSeries;

/// Compute RSI over the series closes.
///
/// Returns a vector aligned with the bars; the first `period` values are
/// `f64::NAN` (the first change only exists at index 1).
pub fn rsi(series: &PriceSeries, period: usize) -> Vec<f64> {
    assert!(period >= 1, "RSI period must be >= 1");
    let closes = series.closes();
    let n = closes.len();
    let mut result = vec![f64::NAN; n];
    if n < period + 1 {
        return result;
    }

    // changes[i] corresponds to bar i (close[i] - close[i-1]); index 0 unused.
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            gains[i] = change;
        } else {
            losses[i] = -change;
        }
    }

    let mut gain_sum: f64 = gains[1..=period].iter().sum();
    let mut loss_sum: f64 = losses[1..=period].iter().sum();
    result[period] = rsi_value(gain_sum, loss_sum);

    for i in (period + 1)..n {
        gain_sum += gains[i] - gains[i - period];
        loss_sum += losses[i] - losses[i - period];
        result[i] = rsi_value(gain_sum, loss_sum);
    }

    result
}

fn rsi_value(gain_sum: f64, loss_sum: f64) -> f64 {
    if loss_sum <= 0.0 && gain_sum <= 0.0 {
        f64::NAN
    } else if loss_sum <= 0.0 {
        100.0
    } else if gain_sum <= 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + gain_sum / loss_sum)
    }
}
