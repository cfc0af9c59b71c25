//! Historical Value-at-Risk and Sharpe ratio.

/// Historical VaR at the given confidence level.
///
/// Empirical quantile of the return distribution at `1 - confidence`,
/// with linear interpolation between order statistics. The result is a
/// signed fractional return — more negative means a larger loss.
/// `None` below `min_observations`.
pub fn compute_var(returns: &[f64], confidence: f64, min_observations: usize) -> Option<f64> {
    let finite: Vec<f64> = returns.iter().copied().filter(|r| r.is_finite()).collect();
    if finite.len() < min_observations {
        return None;
    }
    quantile(&finite, 1.0 - confidence)
}

/// Annualized Sharpe ratio.
///
/// Sharpe = mean(returns - daily_rf) / std(returns - daily_rf, ddof=1)
///          * sqrt(annualization_factor)
///
/// `None` below `min_observations` or when the standard deviation is
/// zero or not finite.
pub fn compute_sharpe(
    returns: &[f64],
    risk_free_rate: f64,
    annualization_factor: f64,
    min_observations: usize,
) -> Option<f64> {
    let finite: Vec<f64> = returns.iter().copied().filter(|r| r.is_finite()).collect();
    if finite.len() < min_observations || finite.len() < 2 {
        return None;
    }

    let daily_rf = risk_free_rate / annualization_factor;
    let excess: Vec<f64> = finite.iter().map(|r| r - daily_rf).collect();

    let n = excess.len() as f64;
    let mean = excess.iter().sum::<f64>() / n;
    let var = excess.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = var.sqrt();

    if std == 0.0 || !std.is_finite() {
        return None;
    }
    Some(mean / std * annualization_factor.sqrt())
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// Matches the convention of pandas' default quantile: the q-th quantile
/// sits at rank (n-1)·q of the ascending-sorted sample.
fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (sorted.len() - 1) as f64 * q;
    let lo = rank.floor() as usize;
    let frac = rank - lo as f64;
    if lo + 1 < sorted.len() {
        Some(sorted[lo] + frac * (sorted[lo + 1] - sorted[lo]))
    } else {
        Some(sorted[lo])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;
    use crate::risk::{ANNUALIZATION_FACTOR, MIN_OBSERVATIONS};

    fn linear_returns(n: usize) -> Vec<f64> {
        // (i - n/2) / 1000: evenly spaced, centered near zero
        (0..n).map(|i| (i as f64 - n as f64 / 2.0) / 1000.0).collect()
    }

    #[test]
    fn var_insufficient_data_is_none() {
        let returns = linear_returns(MIN_OBSERVATIONS - 1);
        assert!(compute_var(&returns, 0.95, MIN_OBSERVATIONS).is_none());
    }

    #[test]
    fn var_known_interpolated_quantile() {
        // 100 evenly spaced returns: s[i] = (i - 50) / 1000.
        // rank = 99 * 0.05 = 4.95 → s[4] + 0.95 * (s[5] - s[4])
        let returns = linear_returns(100);
        let var = compute_var(&returns, 0.95, MIN_OBSERVATIONS).unwrap();
        assert_approx(var, -0.046 + 0.95 * 0.001, 1e-12);
    }

    #[test]
    fn var_99_at_least_as_conservative_as_95() {
        let returns = linear_returns(120);
        let var95 = compute_var(&returns, 0.95, MIN_OBSERVATIONS).unwrap();
        let var99 = compute_var(&returns, 0.99, MIN_OBSERVATIONS).unwrap();
        assert!(var99 <= var95, "var99 {var99} should be <= var95 {var95}");
    }

    #[test]
    fn var_ignores_nan_observations() {
        let mut returns = linear_returns(100);
        returns.push(f64::NAN);
        assert!(compute_var(&returns, 0.95, MIN_OBSERVATIONS).is_some());
    }

    #[test]
    fn sharpe_zero_std_is_none() {
        let returns = vec![0.01; 80];
        assert!(
            compute_sharpe(&returns, 0.0, ANNUALIZATION_FACTOR, MIN_OBSERVATIONS).is_none()
        );
    }

    #[test]
    fn sharpe_insufficient_data_is_none() {
        let returns = vec![0.01, -0.02, 0.005];
        assert!(
            compute_sharpe(&returns, 0.0, ANNUALIZATION_FACTOR, MIN_OBSERVATIONS).is_none()
        );
    }

    #[test]
    fn sharpe_positive_for_positive_drift() {
        let returns: Vec<f64> = (0..100)
            .map(|i| 0.005 + if i % 2 == 0 { 0.002 } else { -0.002 })
            .collect();
        let sharpe =
            compute_sharpe(&returns, 0.0, ANNUALIZATION_FACTOR, MIN_OBSERVATIONS).unwrap();
        assert!(sharpe > 0.0);
    }

    #[test]
    fn sharpe_near_zero_when_rf_matches_mean() {
        // daily mean 0.001 → annual rf 0.252 nets excess mean to zero
        let returns: Vec<f64> = (0..100)
            .map(|i| 0.001 + if i % 2 == 0 { 0.003 } else { -0.003 })
            .collect();
        let sharpe =
            compute_sharpe(&returns, 0.001 * ANNUALIZATION_FACTOR, ANNUALIZATION_FACTOR, 60)
                .unwrap();
        assert_approx(sharpe, 0.0, 1e-9);
    }
}
