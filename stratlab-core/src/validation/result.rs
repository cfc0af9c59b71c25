//! Per-symbol statistical validation: ADF + Hurst on one return window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;
use crate::returns::{series_returns, ReturnType};

use super::adf::{compute_adf, AdfOutcome};
use super::hurst::{compute_hurst, HurstOutcome, HurstRegime};
use super::{ADF_SIGNIFICANCE_LEVEL, DEFAULT_LOOKBACK_DAYS, MIN_OBSERVATIONS};

/// Tunable inputs for the validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationParams {
    pub lookback_days: usize,
    pub return_type: ReturnType,
    pub min_observations: usize,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            return_type: ReturnType::Simple,
            min_observations: MIN_OBSERVATIONS,
        }
    }
}

/// ADF + Hurst diagnostics for a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalValidationResult {
    pub symbol: String,
    pub as_of_date: NaiveDate,
    pub lookback_days: usize,
    pub series_tested: String,
    pub adf: AdfOutcome,
    pub hurst: HurstOutcome,
    pub warnings: Vec<String>,
}

impl StatisticalValidationResult {
    /// Regime label, when the Hurst estimate was available.
    pub fn regime(&self) -> Option<HurstRegime> {
        self.hurst.regime
    }
}

/// Run ADF and Hurst on the same trimmed return window and flag weak
/// predictability in `warnings`.
pub fn compute_validation(
    series: &PriceSeries,
    params: &ValidationParams,
) -> StatisticalValidationResult {
    let mut warnings = Vec::new();
    let as_of = series.latest_bar().date;

    let mut returns = series_returns(series, params.return_type);
    if returns.len() > params.lookback_days {
        returns = returns.split_off(returns.len() - params.lookback_days);
    }

    let adf = compute_adf(&returns, params.min_observations);
    let hurst = compute_hurst(&returns, params.min_observations);

    match adf.pvalue {
        Some(p) if p > ADF_SIGNIFICANCE_LEVEL => warnings.push(format!(
            "ADF test does not reject unit root (p={p:.4} > {ADF_SIGNIFICANCE_LEVEL}). \
             Series may be non-stationary; prediction confidence should be cautious."
        )),
        Some(_) => {}
        None => warnings.push("Insufficient data for ADF test.".to_string()),
    }

    match (hurst.hurst, hurst.regime) {
        (Some(h), Some(HurstRegime::RandomLike)) => warnings.push(format!(
            "Hurst exponent H={h:.3} suggests random-walk-like behavior. \
             Predictability may be limited."
        )),
        (Some(_), _) => {}
        _ => warnings.push("Insufficient data for Hurst exponent.".to_string()),
    }

    let series_tested = match params.return_type {
        ReturnType::Simple => "simple_returns",
        ReturnType::Log => "log_returns",
    };

    StatisticalValidationResult {
        symbol: series.symbol().to_string(),
        as_of_date: as_of,
        lookback_days: params.lookback_days.min(returns.len()),
        series_tested: series_tested.to_string(),
        adf,
        hurst,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn noisy_closes(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = statrs::distribution::Normal::new(0.0, 0.015).unwrap();
        let mut price = 100.0f64;
        (0..n)
            .map(|_| {
                price *= 1.0 + rng.sample::<f64, _>(normal);
                price = price.max(0.01);
                price
            })
            .collect()
    }

    #[test]
    fn validation_populates_both_tests() {
        let series = make_bars(&noisy_closes(400, 5));
        let result = compute_validation(&series, &ValidationParams::default());
        assert!(result.adf.pvalue.is_some());
        assert!(result.hurst.hurst.is_some());
        assert_eq!(result.series_tested, "simple_returns");
        assert_eq!(result.as_of_date, series.latest_bar().date);
    }

    #[test]
    fn validation_warns_on_short_series() {
        let series = make_bars(&noisy_closes(50, 6));
        let result = compute_validation(&series, &ValidationParams::default());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("Insufficient data for ADF")));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("Insufficient data for Hurst")));
    }

    #[test]
    fn validation_warns_on_random_like_regime() {
        // IID returns: Hurst near 0.5 → random-like caution expected.
        let series = make_bars(&noisy_closes(500, 7));
        let result = compute_validation(&series, &ValidationParams::default());
        if result.regime() == Some(HurstRegime::RandomLike) {
            assert!(result
                .warnings
                .iter()
                .any(|w| w.contains("random-walk-like")));
        }
    }

    #[test]
    fn validation_lookback_is_trimmed() {
        let series = make_bars(&noisy_closes(600, 8));
        let result = compute_validation(&series, &ValidationParams::default());
        assert_eq!(result.lookback_days, 252);
    }

    #[test]
    fn validation_serializes_with_snake_case_regime() {
        let series = make_bars(&noisy_closes(400, 9));
        let result = compute_validation(&series, &ValidationParams::default());
        let json = serde_json::to_string(&result).unwrap();
        let back: StatisticalValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
