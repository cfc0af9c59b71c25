//! Return-sequence helpers shared by risk and validation.

use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;

/// Return convention used throughout the risk/validation pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    #[default]
    Simple,
    Log,
}

/// Simple (arithmetic) daily returns: r_t = P_t / P_{t-1} - 1.
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| if w[0] > 0.0 { w[1] / w[0] - 1.0 } else { f64::NAN })
        .collect()
}

/// Log daily returns: l_t = ln(P_t) - ln(P_{t-1}).
pub fn log_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| if w[0] > 0.0 && w[1] > 0.0 { (w[1] / w[0]).ln() } else { f64::NAN })
        .collect()
}

/// Returns of the requested convention from a close sequence.
pub fn returns_of(closes: &[f64], kind: ReturnType) -> Vec<f64> {
    match kind {
        ReturnType::Simple => simple_returns(closes),
        ReturnType::Log => log_returns(closes),
    }
}

/// Returns of the requested convention for a whole series.
pub fn series_returns(series: &PriceSeries, kind: ReturnType) -> Vec<f64> {
    returns_of(&series.closes(), kind)
}
