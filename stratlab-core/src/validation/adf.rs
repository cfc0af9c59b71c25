//! Augmented Dickey-Fuller unit-root test.
//!
//! Constant-only regression with AIC lag selection:
//!
//!   Δy_t = α + γ·y_{t-1} + Σ φ_i·Δy_{t-i} + ε_t
//!
//! The test statistic is the t-ratio on γ. Lag order is chosen by
//! minimizing AIC over 0..=maxlag on a common sample, with
//! maxlag = ceil(12·(n/100)^¼). p-values use the MacKinnon (1994)
//! response-surface approximation through the standard normal CDF;
//! critical values use the MacKinnon (2010) finite-sample surfaces.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Finite-sample critical values for the constant-only regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdfCriticalValues {
    #[serde(rename = "1%")]
    pub pct_1: f64,
    #[serde(rename = "5%")]
    pub pct_5: f64,
    #[serde(rename = "10%")]
    pub pct_10: f64,
}

/// Outcome of the ADF test. All statistical fields are `None` when the
/// sample is too small or the regression is degenerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdfOutcome {
    pub statistic: Option<f64>,
    pub pvalue: Option<f64>,
    pub used_lag: Option<usize>,
    pub nobs: Option<usize>,
    pub critical_values: Option<AdfCriticalValues>,
    pub regression: String,
    pub autolag: String,
}

impl AdfOutcome {
    fn unavailable() -> Self {
        Self {
            statistic: None,
            pvalue: None,
            used_lag: None,
            nobs: None,
            critical_values: None,
            regression: "c".to_string(),
            autolag: "AIC".to_string(),
        }
    }
}

// MacKinnon (1994) p-value surface, constant regression, one variable.
const TAU_MAX: f64 = 2.74;
const TAU_MIN: f64 = -18.83;
const TAU_STAR: f64 = -1.61;
const TAU_SMALL_P: [f64; 3] = [2.1659, 1.4412, 0.038269];
const TAU_LARGE_P: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

// MacKinnon (2010) critical-value surfaces: b0 + b1/N + b2/N² + b3/N³.
const CRIT_1PCT: [f64; 4] = [-3.43035, -6.5393, -16.786, -79.433];
const CRIT_5PCT: [f64; 4] = [-2.86154, -2.8903, -4.234, -40.040];
const CRIT_10PCT: [f64; 4] = [-2.56677, -1.5384, -2.809, 0.0];

/// Run the ADF test on a return sequence.
pub fn compute_adf(returns: &[f64], min_observations: usize) -> AdfOutcome {
    let data: Vec<f64> = returns.iter().copied().filter(|r| r.is_finite()).collect();
    let n = data.len();
    if n < min_observations || n < 12 {
        return AdfOutcome::unavailable();
    }

    let max_lag = {
        let rule = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
        rule.min(n / 2 - 2)
    };

    // First differences: diffs[t] = y[t+1] - y[t].
    let diffs: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();

    // Lag selection on a common sample starting at max_lag.
    let mut best: Option<(f64, usize)> = None;
    for lag in 0..=max_lag {
        if let Some(fit) = fit_adf_regression(&data, &diffs, lag, max_lag) {
            let better = match best {
                Some((best_aic, _)) => fit.aic < best_aic,
                None => true,
            };
            if better {
                best = Some((fit.aic, lag));
            }
        }
    }
    let Some((_, used_lag)) = best else {
        return AdfOutcome::unavailable();
    };

    // Final regression with the chosen lag on its full usable sample.
    let Some(fit) = fit_adf_regression(&data, &diffs, used_lag, used_lag) else {
        return AdfOutcome::unavailable();
    };

    let tau = fit.level_tstat;
    let nobs = fit.nobs;
    let critical_values = AdfCriticalValues {
        pct_1: crit_surface(&CRIT_1PCT, nobs),
        pct_5: crit_surface(&CRIT_5PCT, nobs),
        pct_10: crit_surface(&CRIT_10PCT, nobs),
    };

    AdfOutcome {
        statistic: Some(tau),
        pvalue: Some(mackinnon_pvalue(tau)),
        used_lag: Some(used_lag),
        nobs: Some(nobs),
        critical_values: Some(critical_values),
        regression: "c".to_string(),
        autolag: "AIC".to_string(),
    }
}

struct AdfFit {
    level_tstat: f64,
    aic: f64,
    nobs: usize,
}

/// Fit Δy_t = α + γ·y_{t-1} + Σ φ_i·Δy_{t-i}, observations starting at
/// `start_lag` (a fixed start makes AIC values comparable across lags).
fn fit_adf_regression(data: &[f64], diffs: &[f64], lag: usize, start_lag: usize) -> Option<AdfFit> {
    let m = diffs.len();
    if start_lag >= m {
        return None;
    }
    let nobs = m - start_lag;
    let ncols = lag + 2; // level + lagged diffs + constant
    if nobs <= ncols {
        return None;
    }

    // Columns: [level, Δy_{t-1} .. Δy_{t-lag}, const].
    let mut rows = Vec::with_capacity(nobs);
    let mut y = Vec::with_capacity(nobs);
    for t in start_lag..m {
        let mut row = Vec::with_capacity(ncols);
        row.push(data[t]);
        for i in 1..=lag {
            row.push(diffs[t - i]);
        }
        row.push(1.0);
        rows.push(row);
        y.push(diffs[t]);
    }

    let fit = ols(&rows, &y)?;
    let level_se = fit.stderr[0];
    if level_se <= 0.0 || !level_se.is_finite() {
        return None;
    }

    let n = nobs as f64;
    let llf = -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + (fit.ssr / n).ln() + 1.0);
    let aic = -2.0 * llf + 2.0 * ncols as f64;

    Some(AdfFit {
        level_tstat: fit.params[0] / level_se,
        aic,
        nobs,
    })
}

struct OlsFit {
    params: Vec<f64>,
    stderr: Vec<f64>,
    ssr: f64,
}

/// Ordinary least squares via the normal equations.
///
/// Small, well-conditioned systems only (a dozen columns); returns `None`
/// on a singular cross-product matrix.
fn ols(rows: &[Vec<f64>], y: &[f64]) -> Option<OlsFit> {
    let n = rows.len();
    let k = rows.first()?.len();
    if n <= k {
        return None;
    }

    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for (row, &yi) in rows.iter().zip(y) {
        for i in 0..k {
            xty[i] += row[i] * yi;
            for j in i..k {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..k {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }

    let inv = invert(xtx)?;
    let params: Vec<f64> = (0..k)
        .map(|i| (0..k).map(|j| inv[i][j] * xty[j]).sum())
        .collect();

    let mut ssr = 0.0;
    for (row, &yi) in rows.iter().zip(y) {
        let fitted: f64 = row.iter().zip(&params).map(|(x, b)| x * b).sum();
        ssr += (yi - fitted) * (yi - fitted);
    }
    if !ssr.is_finite() || ssr <= 0.0 {
        return None;
    }

    let sigma2 = ssr / (n - k) as f64;
    let stderr: Vec<f64> = (0..k).map(|i| (sigma2 * inv[i][i]).sqrt()).collect();

    Some(OlsFit { params, stderr, ssr })
}

/// Gauss-Jordan inversion with partial pivoting.
fn invert(mut a: Vec<Vec<f64>>) -> Option<Vec<Vec<f64>>> {
    let k = a.len();
    let mut inv: Vec<Vec<f64>> = (0..k)
        .map(|i| (0..k).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for col in 0..k {
        let pivot_row = (col..k)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot_row][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        let pivot = a[col][col];
        for j in 0..k {
            a[col][j] /= pivot;
            inv[col][j] /= pivot;
        }
        for i in 0..k {
            if i == col {
                continue;
            }
            let factor = a[i][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..k {
                a[i][j] -= factor * a[col][j];
                inv[i][j] -= factor * inv[col][j];
            }
        }
    }
    Some(inv)
}

/// MacKinnon (1994) approximate asymptotic p-value for the tau statistic.
fn mackinnon_pvalue(tau: f64) -> f64 {
    if tau > TAU_MAX {
        return 1.0;
    }
    if tau < TAU_MIN {
        return 0.0;
    }
    let poly: f64 = if tau <= TAU_STAR {
        TAU_SMALL_P
            .iter()
            .enumerate()
            .map(|(i, c)| c * tau.powi(i as i32))
            .sum()
    } else {
        TAU_LARGE_P
            .iter()
            .enumerate()
            .map(|(i, c)| c * tau.powi(i as i32))
            .sum()
    };
    let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
    normal.cdf(poly)
}

/// MacKinnon (2010) critical-value response surface at sample size `nobs`.
fn crit_surface(coeffs: &[f64; 4], nobs: usize) -> f64 {
    let n = nobs as f64;
    coeffs[0] + coeffs[1] / n + coeffs[2] / (n * n) + coeffs[3] / (n * n * n)
}
