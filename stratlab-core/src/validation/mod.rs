//! Statistical validation — ADF stationarity test and Hurst regime.
//!
//! Both tests are Option-gated: below the minimum observation floor (or
//! on degenerate input) every statistical field is `None` and the
//! orchestrator records a human-readable warning instead of failing.

pub mod adf;
pub mod hurst;
pub mod result;

pub use adf::{compute_adf, AdfCriticalValues, AdfOutcome};
pub use hurst::{compute_hurst, HurstOutcome, HurstRegime};
pub use result::{compute_validation, StatisticalValidationResult, ValidationParams};

/// Default lookback window for validation (about one trading year).
pub const DEFAULT_LOOKBACK_DAYS: usize = 252;

/// Minimum return observations for ADF/Hurst.
pub const MIN_OBSERVATIONS: usize = 100;

/// p-value at or below which the ADF test rejects the unit-root null.
pub const ADF_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Hurst below this is classified mean-reverting.
pub const HURST_MEAN_REVERTING_THRESHOLD: f64 = 0.4;

/// Hurst above this is classified trending.
pub const HURST_TRENDING_THRESHOLD: f64 = 0.6;
