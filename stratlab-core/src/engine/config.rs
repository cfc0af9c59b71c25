//! Engine configuration — disclosed weights, thresholds, and windows.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::risk::RiskParams;
use crate::validation::ValidationParams;

/// Weight-sum tolerance for construction-time validation.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Configuration errors are fatal at construction: the engine refuses to
/// exist rather than silently renormalize.
#[derive(Debug, Error, PartialEq)]
pub enum EngineConfigError {
    #[error("ensemble weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },

    #[error("risk distance bounds inverted: min {min} must be below max {max}")]
    RiskDistanceBounds { min: f64, max: f64 },
}

/// Disclosed blending weights for the four evidence groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleWeights {
    pub ml: f64,
    pub technical: f64,
    pub regime: f64,
    pub risk: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            ml: 0.35,
            technical: 0.30,
            regime: 0.20,
            risk: 0.15,
        }
    }
}

impl EnsembleWeights {
    pub fn sum(&self) -> f64 {
        self.ml + self.technical + self.regime + self.risk
    }
}

/// Everything the engine can be tuned with. Defaults are the disclosed
/// methodology; each value can be overridden (e.g. from a TOML file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: EnsembleWeights,
    /// Blended score at or above which a BUY is considered.
    pub buy_threshold: f64,
    /// Blended score at or below which a SELL is considered.
    pub sell_threshold: f64,
    /// Conviction floor for any non-HOLD action.
    pub min_conviction: u8,
    /// Lower clamp for the VaR-derived risk distance (fraction of price).
    pub min_risk_distance: f64,
    /// Upper clamp for the VaR-derived risk distance (fraction of price).
    pub max_risk_distance: f64,
    pub risk: RiskParams,
    pub validation: ValidationParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: EnsembleWeights::default(),
            buy_threshold: 0.20,
            sell_threshold: -0.20,
            min_conviction: 30,
            min_risk_distance: 0.005,
            max_risk_distance: 0.10,
            risk: RiskParams::default(),
            validation: ValidationParams::default(),
        }
    }
}

impl EngineConfig {
    /// Check the construction invariants.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineConfigError::WeightSum { sum });
        }
        if self.min_risk_distance >= self.max_risk_distance {
            return Err(EngineConfigError::RiskDistanceBounds {
                min: self.min_risk_distance,
                max: self.max_risk_distance,
            });
        }
        Ok(())
    }
}
