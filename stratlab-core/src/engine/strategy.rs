//! The strategy engine: blend, conviction, action, levels, narrative.

use crate::domain::{ForecastResult, PriceSeries};
use crate::risk::{compute_risk_snapshot, RiskMetricsSnapshot};
use crate::validation::{compute_validation, StatisticalValidationResult};

use super::config::{EngineConfig, EngineConfigError};
use super::evidence::EvidenceDirection;
use super::levels::build_trade_plan;
use super::recommendation::{
    RawInputs, ScoreBreakdown, StrategyAction, StrategyRecommendation,
};
use super::signals::{ml_signal, regime_signal, risk_signal, round_to, technical_signal};
use super::summary::build_logic_summary;

/// Blends four evidence groups into one risk-first recommendation.
///
/// Stateless per call: identical inputs produce identical output, and a
/// failing sub-signal only silences itself. Construction validates the
/// configuration; an engine with undisclosed weight mass cannot exist.
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    config: EngineConfig,
}

impl StrategyEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine with the disclosed default methodology.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default()).expect("default configuration is valid")
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute a recommendation from price history alone.
    ///
    /// Risk and validation snapshots are computed internally with the
    /// configured lookbacks, then handed to [`Self::recommend_with`].
    pub fn recommend(
        &self,
        series: &PriceSeries,
        forecast: Option<&ForecastResult>,
    ) -> StrategyRecommendation {
        let risk = compute_risk_snapshot(series, &self.config.risk);
        let validation = compute_validation(series, &self.config.validation);
        self.recommend_with(series, forecast, &risk, &validation)
    }

    /// Compute a recommendation from caller-supplied snapshots.
    ///
    /// Use this when the snapshots are already computed for display or
    /// shared across several recommendation calls.
    pub fn recommend_with(
        &self,
        series: &PriceSeries,
        forecast: Option<&ForecastResult>,
        risk_snapshot: &RiskMetricsSnapshot,
        validation: &StatisticalValidationResult,
    ) -> StrategyRecommendation {
        let weights = self.config.weights;
        let current_price = series.latest_close();
        let as_of = series.latest_bar().date;

        let ml = ml_signal(forecast, current_price, weights.ml);
        let technical = technical_signal(series, current_price, weights.technical);
        let (regime_outcome, regime) = regime_signal(validation, weights.regime);
        let (risk_outcome, risk_distance) = risk_signal(risk_snapshot, &self.config);

        let blended = weights.ml * ml.score
            + weights.technical * technical.score
            + weights.regime * regime_outcome.score
            + weights.risk * risk_outcome.score;

        // Agreement across the four groups: a group counts as aligned
        // when its score sits on the blended side of zero.
        let scores = [ml.score, technical.score, regime_outcome.score, risk_outcome.score];
        let blended_nonneg = blended >= 0.0;
        let aligned = scores
            .iter()
            .filter(|s| if blended_nonneg { **s >= 0.0 } else { **s < 0.0 })
            .count();
        let alignment = aligned as f64 / scores.len() as f64;

        let conviction = (100.0 * blended.abs().min(1.0) * alignment)
            .round()
            .clamp(0.0, 100.0) as u8;

        let mut action = if blended >= self.config.buy_threshold
            && conviction >= self.config.min_conviction
        {
            StrategyAction::Buy
        } else if blended <= self.config.sell_threshold
            && conviction >= self.config.min_conviction
        {
            StrategyAction::Sell
        } else {
            StrategyAction::Hold
        };

        // A directional call without a usable risk distance cannot carry
        // a stop-loss; risk-first means it degrades to HOLD.
        if risk_distance.is_none() {
            action = StrategyAction::Hold;
        }

        let plan = match (action, risk_distance) {
            (StrategyAction::Hold, _) | (_, None) => None,
            (_, Some(rd)) => Some(build_trade_plan(
                action,
                current_price,
                rd,
                regime,
                forecast,
                series,
            )),
        };

        let mut bullish = Vec::new();
        let mut bearish = Vec::new();
        let mut neutral = Vec::new();
        let all_evidence = ml
            .evidence
            .into_iter()
            .chain(technical.evidence)
            .chain(regime_outcome.evidence)
            .chain(risk_outcome.evidence);
        for signal in all_evidence {
            match signal.direction {
                EvidenceDirection::Bullish => bullish.push(signal),
                EvidenceDirection::Bearish => bearish.push(signal),
                EvidenceDirection::Neutral => neutral.push(signal),
            }
        }

        let logic_summary =
            build_logic_summary(action, conviction, regime, &bullish, &bearish);

        let raw_inputs = RawInputs {
            scores: ScoreBreakdown {
                ml: round_to(ml.score, 4),
                technical: round_to(technical.score, 4),
                regime: round_to(regime_outcome.score, 4),
                risk: round_to(risk_outcome.score, 4),
                blended: round_to(blended, 4),
            },
            alignment: round_to(alignment, 4),
            risk_distance: risk_distance.map(|rd| round_to(rd, 6)),
            regime,
            weights,
        };

        StrategyRecommendation {
            symbol: series.symbol().to_string(),
            as_of_date: as_of,
            action,
            conviction,
            regime,
            plan,
            evidence_bullish: bullish,
            evidence_bearish: bearish,
            evidence_neutral: neutral,
            logic_summary,
            raw_inputs,
        }
    }
}
