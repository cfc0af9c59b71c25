//! The four signal extractors feeding the blend.
//!
//! Every extractor degrades to a neutral score plus an explicit
//! "unavailable" evidence entry when its input is missing or not
//! computable — a dead signal never aborts the recommendation.

use crate::domain::{ForecastResult, PriceSeries};
use crate::indicators::{
    ema, last_finite, macd, rsi, DEFAULT_MACD_PERIODS, DEFAULT_RSI_PERIOD, TREND_EMA_PERIOD,
};
use crate::risk::RiskMetricsSnapshot;
use crate::validation::{HurstRegime, StatisticalValidationResult};

use super::config::EngineConfig;
use super::evidence::{direction_for, EvidenceDirection, EvidenceSignal, EvidenceSource, RawMetric};

/// Score plus the evidence entries it produced.
#[derive(Debug, Clone)]
pub(crate) struct SignalOutcome {
    pub score: f64,
    pub evidence: Vec<EvidenceSignal>,
}

/// Round for display/audit fields.
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// np.interp-style piecewise-linear interpolation, saturating outside the
/// control points.
pub(crate) fn interp(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }
    for i in 1..xs.len() {
        if x <= xs[i] {
            let t = (x - xs[i - 1]) / (xs[i] - xs[i - 1]);
            return ys[i - 1] + t * (ys[i] - ys[i - 1]);
        }
    }
    ys[ys.len() - 1]
}

/// Directional score from the ML forecast.
///
/// score = clamp((predicted_close / current_price - 1) * 10, -1, 1)
pub(crate) fn ml_signal(
    forecast: Option<&ForecastResult>,
    current_price: f64,
    weight: f64,
) -> SignalOutcome {
    let Some(forecast) = forecast.filter(|_| current_price > 0.0) else {
        return SignalOutcome {
            score: 0.0,
            evidence: vec![EvidenceSignal::unavailable(
                EvidenceSource::MlForecast,
                weight,
                "ML forecast unavailable – treated as neutral.",
            )],
        };
    };

    let pct_move = forecast.predicted_close / current_price - 1.0;
    let score = (pct_move * 10.0).clamp(-1.0, 1.0);

    SignalOutcome {
        score,
        evidence: vec![EvidenceSignal {
            source: EvidenceSource::MlForecast,
            direction: direction_for(score, 0.05),
            weight,
            score: round_to(score, 4),
            summary: format!(
                "ML predicts {:.2} ({:+.2}% vs current {:.2}).",
                forecast.predicted_close,
                pct_move * 100.0,
                current_price
            ),
            raw: Some(RawMetric::Forecast {
                predicted_close: forecast.predicted_close,
                current_price,
                pct_move: round_to(pct_move, 6),
            }),
        }],
    }
}

/// Composite technical score from RSI, MACD, and EMA(50).
///
/// Each computable sub-indicator maps into [-1, +1]; the composite is
/// their arithmetic mean. Sub-indicators that cannot produce a finite
/// value are simply skipped.
pub(crate) fn technical_signal(
    series: &PriceSeries,
    current_price: f64,
    weight: f64,
) -> SignalOutcome {
    let mut evidence = Vec::new();
    let mut sub_scores = Vec::new();

    // RSI: oversold is bullish, overbought is bearish.
    if let Some(rsi_val) = last_finite(&rsi(series, DEFAULT_RSI_PERIOD)) {
        let score = if rsi_val < 30.0 {
            1.0
        } else if rsi_val > 70.0 {
            -1.0
        } else {
            interp(rsi_val, &[30.0, 70.0], &[1.0, -1.0])
        };
        sub_scores.push(score);
        evidence.push(EvidenceSignal {
            source: EvidenceSource::Rsi,
            direction: direction_for(score, 0.1),
            weight,
            score: round_to(score, 4),
            summary: format!("RSI({DEFAULT_RSI_PERIOD}) = {rsi_val:.1}."),
            raw: Some(RawMetric::Rsi {
                value: round_to(rsi_val, 2),
            }),
        });
    }

    // MACD: histogram normalized by price.
    let (fast, slow, signal) = DEFAULT_MACD_PERIODS;
    let macd_out = macd(series, fast, slow, signal);
    if let (Some(hist_val), Some(macd_val)) = (
        last_finite(&macd_out.histogram),
        last_finite(&macd_out.macd_line),
    ) {
        if current_price > 0.0 {
            let score = (hist_val / current_price * 100.0).clamp(-1.0, 1.0);
            sub_scores.push(score);
            evidence.push(EvidenceSignal {
                source: EvidenceSource::Macd,
                direction: direction_for(score, 0.05),
                weight,
                score: round_to(score, 4),
                summary: format!("MACD histogram = {hist_val:.4}."),
                raw: Some(RawMetric::Macd {
                    macd: round_to(macd_val, 4),
                    histogram: round_to(hist_val, 4),
                }),
            });
        }
    }

    // EMA(50): price above the long EMA is bullish.
    if let Some(ema_val) = last_finite(&ema(series, TREND_EMA_PERIOD)) {
        if current_price > 0.0 && ema_val > 0.0 {
            let score = ((current_price - ema_val) / ema_val * 10.0).clamp(-1.0, 1.0);
            sub_scores.push(score);
            let side = if current_price > ema_val { "above" } else { "below" };
            evidence.push(EvidenceSignal {
                source: EvidenceSource::Ema,
                direction: direction_for(score, 0.05),
                weight,
                score: round_to(score, 4),
                summary: format!("Price {side} EMA({TREND_EMA_PERIOD}) = {ema_val:.2}."),
                raw: Some(RawMetric::Ema {
                    value: round_to(ema_val, 4),
                }),
            });
        }
    }

    if sub_scores.is_empty() {
        return SignalOutcome {
            score: 0.0,
            evidence: vec![EvidenceSignal::unavailable(
                EvidenceSource::Rsi,
                weight,
                "Technical indicators unavailable – neutral.",
            )],
        };
    }

    SignalOutcome {
        score: sub_scores.iter().sum::<f64>() / sub_scores.len() as f64,
        evidence,
    }
}

/// Regime score from the Hurst classification.
///
/// Trending favors trend-following (+0.5), mean reversion argues caution
/// (-0.3), random-like carries no direction.
pub(crate) fn regime_signal(
    validation: &StatisticalValidationResult,
    weight: f64,
) -> (SignalOutcome, Option<HurstRegime>) {
    let (Some(hurst_val), Some(regime)) = (validation.hurst.hurst, validation.hurst.regime) else {
        let outcome = SignalOutcome {
            score: 0.0,
            evidence: vec![EvidenceSignal::unavailable(
                EvidenceSource::Hurst,
                weight,
                "Hurst exponent unavailable – regime unknown.",
            )],
        };
        return (outcome, None);
    };

    let (score, direction) = match regime {
        HurstRegime::Trending => (0.5, EvidenceDirection::Bullish),
        HurstRegime::MeanReverting => (-0.3, EvidenceDirection::Bearish),
        HurstRegime::RandomLike => (0.0, EvidenceDirection::Neutral),
    };

    let outcome = SignalOutcome {
        score,
        evidence: vec![EvidenceSignal {
            source: EvidenceSource::Hurst,
            direction,
            weight,
            score: round_to(score, 4),
            summary: format!("Hurst = {hurst_val:.3} → {regime} regime."),
            raw: Some(RawMetric::Hurst {
                value: round_to(hurst_val, 4),
            }),
        }],
    };
    (outcome, Some(regime))
}

/// Risk score from the 1-day 95% VaR.
///
/// Low realized risk scores bullish, high risk bearish, independent of
/// price direction. Also derives the clamped risk distance used for
/// entry/stop/target levels.
pub(crate) fn risk_signal(
    snapshot: &RiskMetricsSnapshot,
    config: &EngineConfig,
) -> (SignalOutcome, Option<f64>) {
    let Some(var_pct) = snapshot.var_95_pct else {
        let outcome = SignalOutcome {
            score: 0.0,
            evidence: vec![EvidenceSignal::unavailable(
                EvidenceSource::Var,
                config.weights.risk,
                "VaR unavailable – risk assessment neutral.",
            )],
        };
        return (outcome, None);
    };

    let abs_var = var_pct.abs();
    let risk_distance = abs_var.clamp(config.min_risk_distance, config.max_risk_distance);
    let score = interp(abs_var, &[0.0, 0.05, 0.10], &[0.5, 0.0, -1.0]);

    let outcome = SignalOutcome {
        score,
        evidence: vec![EvidenceSignal {
            source: EvidenceSource::Var,
            direction: direction_for(score, 0.1),
            weight: config.weights.risk,
            score: round_to(score, 4),
            summary: format!(
                "1-day 95% VaR = {:+.2}%; risk distance = {:.2}%.",
                var_pct * 100.0,
                risk_distance * 100.0
            ),
            raw: Some(RawMetric::Var {
                var_95_pct: round_to(var_pct, 6),
                risk_distance: round_to(risk_distance, 6),
            }),
        }],
    };
    (outcome, Some(risk_distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastMethod;
    use crate::indicators::{assert_approx, make_bars};
    use crate::risk::{compute_risk_snapshot, RiskParams};
    use crate::validation::{compute_validation, ValidationParams};
    use chrono::NaiveDate;

    fn forecast(predicted: f64) -> ForecastResult {
        ForecastResult::new(
            "TEST",
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            ForecastMethod::Ml,
            predicted,
        )
    }

    #[test]
    fn ml_signal_clamps_large_moves() {
        let out = ml_signal(Some(&forecast(150.0)), 100.0, 0.35);
        assert_approx(out.score, 1.0, 1e-12);
        assert_eq!(out.evidence[0].direction, EvidenceDirection::Bullish);
    }

    #[test]
    fn ml_signal_scales_small_moves() {
        let out = ml_signal(Some(&forecast(102.0)), 100.0, 0.35);
        assert_approx(out.score, 0.2, 1e-12);
    }

    #[test]
    fn ml_signal_bearish_forecast() {
        let out = ml_signal(Some(&forecast(90.0)), 100.0, 0.35);
        assert_approx(out.score, -1.0, 1e-12);
        assert_eq!(out.evidence[0].direction, EvidenceDirection::Bearish);
    }

    #[test]
    fn ml_signal_missing_forecast_is_neutral_unavailable() {
        let out = ml_signal(None, 100.0, 0.35);
        assert_eq!(out.score, 0.0);
        assert!(!out.evidence[0].was_computed());
        assert!(out.evidence[0].summary.contains("unavailable"));
    }

    #[test]
    fn technical_signal_produces_three_entries_on_long_series() {
        let closes: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.35).sin() * 4.0)
            .collect();
        let series = make_bars(&closes);
        let out = technical_signal(&series, series.latest_close(), 0.30);
        assert_eq!(out.evidence.len(), 3);
        assert!(out.evidence.iter().all(|e| e.was_computed()));
        assert!(out.score.abs() <= 1.0);
    }

    #[test]
    fn technical_signal_short_series_degrades() {
        // Two bars: RSI has no window, but first-value-seeded EMAs exist,
        // so MACD and EMA still contribute.
        let series = make_bars(&[100.0, 101.0]);
        let out = technical_signal(&series, 101.0, 0.30);
        assert!(!out.evidence.is_empty());
    }

    #[test]
    fn interp_saturates() {
        let xs = [0.0, 0.05, 0.10];
        let ys = [0.5, 0.0, -1.0];
        assert_approx(interp(-0.01, &xs, &ys), 0.5, 1e-12);
        assert_approx(interp(0.0, &xs, &ys), 0.5, 1e-12);
        assert_approx(interp(0.025, &xs, &ys), 0.25, 1e-12);
        assert_approx(interp(0.075, &xs, &ys), -0.5, 1e-12);
        assert_approx(interp(0.2, &xs, &ys), -1.0, 1e-12);
    }

    #[test]
    fn regime_signal_maps_regimes_to_scores() {
        let closes: Vec<f64> = (0..400)
            .map(|i| 100.0 + (i as f64 / 60.0).sin() * 20.0 + i as f64 * 0.05)
            .collect();
        let series = make_bars(&closes);
        let validation = compute_validation(&series, &ValidationParams::default());
        let (out, regime) = regime_signal(&validation, 0.20);
        match regime {
            Some(HurstRegime::Trending) => assert_approx(out.score, 0.5, 1e-12),
            Some(HurstRegime::MeanReverting) => assert_approx(out.score, -0.3, 1e-12),
            Some(HurstRegime::RandomLike) | None => assert_approx(out.score, 0.0, 1e-12),
        }
    }

    #[test]
    fn regime_signal_unavailable_without_hurst() {
        let series = make_bars(&[100.0, 101.0, 102.0]);
        let validation = compute_validation(&series, &ValidationParams::default());
        let (out, regime) = regime_signal(&validation, 0.20);
        assert!(regime.is_none());
        assert_eq!(out.score, 0.0);
        assert!(!out.evidence[0].was_computed());
    }

    #[test]
    fn risk_signal_low_var_is_bullish() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 100.0 * (1.0 + 0.001 * ((i as f64 * 1.7).sin())))
            .collect();
        let series = make_bars(&closes);
        let snapshot = compute_risk_snapshot(&series, &RiskParams::default());
        let config = EngineConfig::default();
        let (out, rd) = risk_signal(&snapshot, &config);
        assert!(out.score > 0.0);
        // tiny VaR clamps up to the minimum risk distance
        assert_approx(rd.unwrap(), config.min_risk_distance, 1e-12);
    }

    #[test]
    fn risk_signal_unavailable_without_var() {
        let series = make_bars(&[100.0, 101.0, 99.0]);
        let snapshot = compute_risk_snapshot(&series, &RiskParams::default());
        let (out, rd) = risk_signal(&snapshot, &EngineConfig::default());
        assert!(rd.is_none());
        assert_eq!(out.score, 0.0);
        assert!(!out.evidence[0].was_computed());
    }

    #[test]
    fn risk_distance_clamps_high_var() {
        let mut snapshot = {
            let closes: Vec<f64> = (0..200)
                .map(|i| 100.0 + (i as f64 * 0.8).sin())
                .collect();
            compute_risk_snapshot(&make_bars(&closes), &RiskParams::default())
        };
        snapshot.var_95_pct = Some(-0.25);
        let config = EngineConfig::default();
        let (out, rd) = risk_signal(&snapshot, &config);
        assert_approx(rd.unwrap(), config.max_risk_distance, 1e-12);
        assert_approx(out.score, -1.0, 1e-12);
    }
}
