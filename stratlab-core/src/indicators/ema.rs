//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1],
//! alpha = 2 / (period + 1). Seeded with the first value, so the output
//! is defined from index 0 with no look-ahead.

use crate::domain::PriceSeries;

/// Compute EMA over the series closes.
pub fn ema(series: &PriceSeries, period: usize) -> Vec<f64> {
    ema_of_values(&series.closes(), period)
}

/// Compute EMA over an arbitrary value slice.
///
/// Used by MACD, which needs EMAs of both closes and of the MACD line.
pub fn ema_of_values(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "EMA period must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n == 0 {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = values[0];
    result[0] = prev;
    for i in 1..n {
        if !values[i].is_finite() {
            // A hole taints everything after it.
            for v in result.iter_mut().skip(i) {
                *v = f64::NAN;
            }
            return result;
        }
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = prev;
    }
    result
}
