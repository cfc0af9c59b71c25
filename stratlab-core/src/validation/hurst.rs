//! Hurst exponent via the aggregated-variance method.
//!
//! Block sizes are powers of two up to n/4. For each block size k the
//! data is partitioned into non-overlapping blocks, the variance of the
//! block means is computed, and log(variance) is regressed on log(k).
//! H = 1 + slope/2, clamped to [0, 1]. For i.i.d. increments the block
//! variance decays like 1/k (slope -1, H = 0.5); slower decay means
//! persistence, faster decay means mean reversion.

use serde::{Deserialize, Serialize};

use super::{HURST_MEAN_REVERTING_THRESHOLD, HURST_TRENDING_THRESHOLD};

/// Price-return regime implied by the Hurst exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HurstRegime {
    MeanReverting,
    RandomLike,
    Trending,
}

impl std::fmt::Display for HurstRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HurstRegime::MeanReverting => "mean-reverting",
            HurstRegime::RandomLike => "random-like",
            HurstRegime::Trending => "trending",
        };
        write!(f, "{label}")
    }
}

impl HurstRegime {
    /// Classify an exponent against the regime thresholds.
    pub fn classify(hurst: f64) -> Self {
        if hurst < HURST_MEAN_REVERTING_THRESHOLD {
            HurstRegime::MeanReverting
        } else if hurst > HURST_TRENDING_THRESHOLD {
            HurstRegime::Trending
        } else {
            HurstRegime::RandomLike
        }
    }
}

/// Outcome of the Hurst estimation. `None` fields mean the sample was too
/// small or too degenerate for a usable log-log regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HurstOutcome {
    pub hurst: Option<f64>,
    pub method: String,
    pub r_squared: Option<f64>,
    pub regime: Option<HurstRegime>,
}

impl HurstOutcome {
    fn unavailable() -> Self {
        Self {
            hurst: None,
            method: METHOD.to_string(),
            r_squared: None,
            regime: None,
        }
    }
}

const METHOD: &str = "aggvar_increments";

/// Minimum usable (block size, variance) points for the regression.
const MIN_REGRESSION_POINTS: usize = 3;

/// Estimate the Hurst exponent of a return sequence.
pub fn compute_hurst(returns: &[f64], min_observations: usize) -> HurstOutcome {
    let data: Vec<f64> = returns.iter().copied().filter(|r| r.is_finite()).collect();
    let n = data.len();
    if n < min_observations {
        return HurstOutcome::unavailable();
    }

    // Block sizes: powers of two up to n/4.
    let max_k = (n / 4).max(2);
    let mut block_sizes = Vec::new();
    let mut k = 2;
    while k <= max_k {
        block_sizes.push(k);
        k *= 2;
    }
    if block_sizes.len() < MIN_REGRESSION_POINTS {
        return HurstOutcome::unavailable();
    }

    let mut log_k = Vec::new();
    let mut log_var = Vec::new();
    for &k in &block_sizes {
        let n_blocks = n / k;
        if n_blocks < 2 {
            continue;
        }
        let means: Vec<f64> = (0..n_blocks)
            .map(|b| data[b * k..(b + 1) * k].iter().sum::<f64>() / k as f64)
            .collect();
        let grand = means.iter().sum::<f64>() / n_blocks as f64;
        let variance = means.iter().map(|m| (m - grand).powi(2)).sum::<f64>()
            / (n_blocks - 1) as f64;
        if variance > 0.0 {
            log_k.push((k as f64).ln());
            log_var.push(variance.ln());
        }
    }
    if log_k.len() < MIN_REGRESSION_POINTS {
        return HurstOutcome::unavailable();
    }

    let (slope, intercept) = least_squares_line(&log_k, &log_var);
    let hurst = (1.0 + slope / 2.0).clamp(0.0, 1.0);

    // R² as a fit-quality diagnostic.
    let mean_y = log_var.iter().sum::<f64>() / log_var.len() as f64;
    let ss_tot: f64 = log_var.iter().map(|y| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = log_k
        .iter()
        .zip(&log_var)
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot > 0.0 { Some(1.0 - ss_res / ss_tot) } else { None };

    HurstOutcome {
        hurst: Some(hurst),
        method: METHOD.to_string(),
        r_squared,
        regime: Some(HurstRegime::classify(hurst)),
    }
}

/// Two-parameter least squares: returns (slope, intercept).
fn least_squares_line(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let cov: f64 = x.iter().zip(y).map(|(a, b)| (a - mean_x) * (b - mean_y)).sum();
    let var: f64 = x.iter().map(|a| (a - mean_x).powi(2)).sum();
    let slope = cov / var;
    (slope, mean_y - slope * mean_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::MIN_OBSERVATIONS;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn hurst_insufficient_data_is_none() {
        let returns = vec![0.01, -0.02, 0.005];
        let out = compute_hurst(&returns, MIN_OBSERVATIONS);
        assert!(out.hurst.is_none());
        assert!(out.regime.is_none());
        assert_eq!(out.method, "aggvar_increments");
    }

    #[test]
    fn hurst_iid_returns_look_random() {
        let mut rng = StdRng::seed_from_u64(42);
        let normal = statrs::distribution::Normal::new(0.0, 0.02).unwrap();
        let returns: Vec<f64> = (0..512).map(|_| rng.sample(normal)).collect();
        let out = compute_hurst(&returns, MIN_OBSERVATIONS);
        let h = out.hurst.unwrap();
        assert!((0.3..0.7).contains(&h), "iid Hurst out of range: {h}");
        assert_eq!(out.regime.unwrap(), HurstRegime::RandomLike);
    }

    #[test]
    fn hurst_alternating_returns_mean_revert() {
        // Strict alternation cancels inside every block: block variance
        // collapses far faster than 1/k.
        let returns: Vec<f64> = (0..256)
            .map(|i| if i % 2 == 0 { 0.01 } else { -0.0099 })
            .collect();
        let out = compute_hurst(&returns, MIN_OBSERVATIONS);
        let h = out.hurst.unwrap();
        assert!(h < 0.4, "alternating Hurst should be low: {h}");
        assert_eq!(out.regime.unwrap(), HurstRegime::MeanReverting);
    }

    #[test]
    fn hurst_slowly_varying_returns_trend() {
        // A slow drift in the return level keeps block means apart: block
        // variance barely decays, so the exponent saturates high.
        let returns: Vec<f64> = (0..512).map(|i| (i as f64 / 80.0).sin() * 0.01).collect();
        let out = compute_hurst(&returns, MIN_OBSERVATIONS);
        let h = out.hurst.unwrap();
        assert!(h > 0.6, "persistent Hurst should be high: {h}");
        assert_eq!(out.regime.unwrap(), HurstRegime::Trending);
    }

    #[test]
    fn hurst_constant_returns_unavailable() {
        // Zero block variance at every size leaves nothing to regress.
        let returns = vec![0.01; 256];
        let out = compute_hurst(&returns, MIN_OBSERVATIONS);
        assert!(out.hurst.is_none());
    }

    #[test]
    fn hurst_is_clamped() {
        let returns: Vec<f64> = (0..512).map(|i| (i as f64 / 80.0).sin() * 0.01).collect();
        let h = compute_hurst(&returns, MIN_OBSERVATIONS).hurst.unwrap();
        assert!((0.0..=1.0).contains(&h));
    }

    #[test]
    fn regime_classification_thresholds() {
        assert_eq!(HurstRegime::classify(0.39), HurstRegime::MeanReverting);
        assert_eq!(HurstRegime::classify(0.4), HurstRegime::RandomLike);
        assert_eq!(HurstRegime::classify(0.6), HurstRegime::RandomLike);
        assert_eq!(HurstRegime::classify(0.61), HurstRegime::Trending);
    }

    #[test]
    fn regime_display_labels() {
        assert_eq!(HurstRegime::MeanReverting.to_string(), "mean-reverting");
        assert_eq!(HurstRegime::Trending.to_string(), "trending");
    }
}
