//! Technical indicators — RSI, MACD, EMA.
//!
//! All three are pure functions over a `PriceSeries` (bars already sorted
//! ascending by date — a structural invariant of the series type). Output
//! is a `Vec<f64>` aligned with the bars; warmup indices are `f64::NAN`.

pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::{ema, ema_of_values};
pub use macd::{macd, MacdSeries};
pub use rsi::rsi;

/// Default RSI lookback.
pub const DEFAULT_RSI_PERIOD: usize = 14;
/// Default MACD periods (fast, slow, signal).
pub const DEFAULT_MACD_PERIODS: (usize, usize, usize) = (12, 26, 9);
/// Default EMA lookback.
pub const DEFAULT_EMA_PERIOD: usize = 20;
/// EMA period the strategy engine compares price against.
pub const TREND_EMA_PERIOD: usize = 50;

/// Last finite value of an indicator series, if any.
pub fn last_finite(values: &[f64]) -> Option<f64> {
    values.iter().rev().copied().find(|v| v.is_finite())
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high/low bracket open and close, volume constant.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> crate::domain::PriceSeries {
    use crate::domain::{PriceBar, PriceSeries, SourceRecord};

    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars: Vec<PriceBar> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) * 1.01,
                low: open.min(close) * 0.99,
                close,
                volume: Some(1000.0),
                adjusted_close: None,
            }
        })
        .collect();
    let source = SourceRecord {
        provider: "synthetic".into(),
        fetched_at: base_date.and_hms_opt(0, 0, 0).unwrap(),
        range_start: bars.first().unwrap().date,
        range_end: bars.last().unwrap().date,
    };
    PriceSeries::new("TEST", bars, source, base_date.and_hms_opt(0, 0, 0).unwrap())
        .expect("synthetic bars are valid")
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
