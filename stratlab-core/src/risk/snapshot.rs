//! Per-symbol risk snapshot: 1-day VaR at two confidence levels + Sharpe.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;
use crate::returns::{series_returns, ReturnType};

use super::var::{compute_sharpe, compute_var};
use super::{ANNUALIZATION_FACTOR, DEFAULT_LOOKBACK_DAYS, MIN_OBSERVATIONS, VAR_METHOD};

/// Tunable inputs for the risk snapshot. Every field is overridable from
/// the engine configuration; defaults match the disclosed methodology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParams {
    pub lookback_days: usize,
    pub return_type: ReturnType,
    pub risk_free_rate: f64,
    pub min_observations: usize,
    pub confidence_primary: f64,
    pub confidence_secondary: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            return_type: ReturnType::Simple,
            risk_free_rate: 0.0,
            min_observations: MIN_OBSERVATIONS,
            confidence_primary: 0.95,
            confidence_secondary: 0.99,
        }
    }
}

/// Risk companion for a single symbol at a point in time.
///
/// VaR percentages are signed fractional returns (negative = loss); the
/// absolute fields are the same losses in currency units at the last
/// close. Missing metrics stay `None` and are explained in `warnings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetricsSnapshot {
    pub symbol: String,
    pub as_of_date: NaiveDate,
    pub lookback_days: usize,
    pub return_type: ReturnType,
    pub var_method: String,
    pub var_95_pct: Option<f64>,
    pub var_99_pct: Option<f64>,
    pub var_95_abs: Option<f64>,
    pub var_99_abs: Option<f64>,
    pub sharpe: Option<f64>,
    pub risk_free_rate: f64,
    pub warnings: Vec<String>,
}

/// Build a risk snapshot for a single symbol.
///
/// Trims the return sequence to the lookback window, computes VaR at both
/// confidence levels plus the annualized Sharpe, and converts VaR to
/// absolute currency using the latest close.
pub fn compute_risk_snapshot(series: &PriceSeries, params: &RiskParams) -> RiskMetricsSnapshot {
    let mut warnings = Vec::new();
    let last_close = series.latest_close();
    let as_of = series.latest_bar().date;

    let mut returns = series_returns(series, params.return_type);
    if returns.len() > params.lookback_days {
        returns = returns.split_off(returns.len() - params.lookback_days);
    }

    let var_95 = compute_var(&returns, params.confidence_primary, params.min_observations);
    let var_99 = compute_var(&returns, params.confidence_secondary, params.min_observations);
    let sharpe = compute_sharpe(
        &returns,
        params.risk_free_rate,
        ANNUALIZATION_FACTOR,
        params.min_observations,
    );

    if var_95.is_none() {
        warnings.push(format!(
            "Insufficient data for VaR/Sharpe ({} obs, need {})",
            returns.len(),
            params.min_observations
        ));
    }

    RiskMetricsSnapshot {
        symbol: series.symbol().to_string(),
        as_of_date: as_of,
        lookback_days: params.lookback_days.min(returns.len()),
        return_type: params.return_type,
        var_method: VAR_METHOD.to_string(),
        var_95_pct: var_95,
        var_99_pct: var_99,
        var_95_abs: var_95.map(|v| v * last_close),
        var_99_abs: var_99.map(|v| v * last_close),
        sharpe,
        risk_free_rate: params.risk_free_rate,
        warnings,
    }
}
