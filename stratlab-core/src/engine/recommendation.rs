//! The recommendation output type and its audit block.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::HurstRegime;

use super::config::EnsembleWeights;
use super::evidence::EvidenceSignal;

/// Terminal action of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyAction {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for StrategyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StrategyAction::Buy => "BUY",
            StrategyAction::Sell => "SELL",
            StrategyAction::Hold => "HOLD",
        };
        write!(f, "{label}")
    }
}

/// Price levels for a non-HOLD action.
///
/// Grouping them in one struct makes the completeness invariant
/// structural: a BUY/SELL recommendation carries all of them, a HOLD
/// carries none (`plan: None`) — there is no partially-filled state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry_zone_lower: f64,
    pub entry_zone_upper: f64,
    pub target_exit: f64,
    pub stop_loss: f64,
    /// Risk distance as a percentage of price (e.g. 2.5 = 2.5%).
    pub risk_distance_pct: f64,
}

/// Per-source score breakdown recorded for auditing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub ml: f64,
    pub technical: f64,
    pub regime: f64,
    pub risk: f64,
    pub blended: f64,
}

/// Raw blend inputs snapshotted at recommendation time so the output is
/// auditable without replaying the computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub scores: ScoreBreakdown,
    pub alignment: f64,
    pub risk_distance: Option<f64>,
    pub regime: Option<HurstRegime>,
    pub weights: EnsembleWeights,
}

/// Assistant-produced strategy guidance for one symbol at a point in
/// time. Fully self-describing: consumers can render or persist it with
/// no external lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    pub symbol: String,
    pub as_of_date: NaiveDate,
    pub action: StrategyAction,
    /// 0–100, reflecting blended magnitude and cross-source agreement.
    pub conviction: u8,
    pub regime: Option<HurstRegime>,
    pub plan: Option<TradePlan>,
    pub evidence_bullish: Vec<EvidenceSignal>,
    pub evidence_bearish: Vec<EvidenceSignal>,
    pub evidence_neutral: Vec<EvidenceSignal>,
    pub logic_summary: String,
    pub raw_inputs: RawInputs,
}
