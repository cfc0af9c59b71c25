//! Moving Average Convergence Divergence (MACD).
//!
//! macd_line = EMA(close, fast) - EMA(close, slow)
//! signal_line = EMA(macd_line, signal)
//! histogram = macd_line - signal_line

use crate::domain::PriceSeries;

use super::ema::ema_of_values;

/// The three MACD output series, aligned with the input bars.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Compute MACD over the series closes.
pub fn macd(series: &PriceSeries, fast: usize, slow: usize, signal: usize) -> MacdSeries {
    assert!(fast < slow, "MACD fast period must be shorter than slow");
    let closes = series.closes();

    let fast_ema = ema_of_values(&closes, fast);
    let slow_ema = ema_of_values(&closes, slow);

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_of_values(&macd_line, signal);
    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    MacdSeries {
        macd_line,
        signal_line,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn macd_of_constant_series_is_zero() {
        let series = make_bars(&[50.0; 60]);
        let out = macd(&series, 12, 26, 9);
        for i in 0..60 {
            assert_approx(out.macd_line[i], 0.0, DEFAULT_EPSILON);
            assert_approx(out.signal_line[i], 0.0, DEFAULT_EPSILON);
            assert_approx(out.histogram[i], 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn macd_positive_on_sustained_uptrend() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let series = make_bars(&closes);
        let out = macd(&series, 12, 26, 9);
        // Fast EMA tracks a rising series more closely than slow EMA.
        let last = out.macd_line.last().copied().unwrap();
        assert!(last > 0.0, "macd_line should be positive, got {last}");
    }

    #[test]
    fn macd_histogram_is_line_minus_signal() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let series = make_bars(&closes);
        let out = macd(&series, 12, 26, 9);
        for i in 0..50 {
            assert_approx(
                out.histogram[i],
                out.macd_line[i] - out.signal_line[i],
                DEFAULT_EPSILON,
            );
        }
    }

    #[test]
    fn macd_output_lengths_match_input() {
        let series = make_bars(&[100.0, 101.0, 99.0]);
        let out = macd(&series, 12, 26, 9);
        assert_eq!(out.macd_line.len(), 3);
        assert_eq!(out.signal_line.len(), 3);
        assert_eq!(out.histogram.len(), 3);
    }
}
