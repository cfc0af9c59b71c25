//! Evidence panel types — one explainable entry per computed sub-signal.

use serde::{Deserialize, Serialize};

/// Signal source feeding the ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    MlForecast,
    Rsi,
    Macd,
    Ema,
    Var,
    Hurst,
}

/// Directional classification of a single signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceDirection {
    Bullish,
    Bearish,
    Neutral,
}

/// Raw metric behind an evidence entry, typed per source.
///
/// Presence distinguishes a computed signal from an unavailable one: a
/// signal that was actually computed always carries its raw metric, a
/// degraded "unavailable" placeholder never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawMetric {
    Forecast {
        predicted_close: f64,
        current_price: f64,
        pct_move: f64,
    },
    Rsi {
        value: f64,
    },
    Macd {
        macd: f64,
        histogram: f64,
    },
    Ema {
        value: f64,
    },
    Var {
        var_95_pct: f64,
        risk_distance: f64,
    },
    Hurst {
        value: f64,
    },
}

/// One explainable contribution to a recommendation. Created once per
/// recommendation, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSignal {
    pub source: EvidenceSource,
    pub direction: EvidenceDirection,
    /// Disclosed blending weight of the source group.
    pub weight: f64,
    /// Normalized signal in [-1, +1].
    pub score: f64,
    /// Short reason shown to the user.
    pub summary: String,
    pub raw: Option<RawMetric>,
}

impl EvidenceSignal {
    /// Placeholder for a signal that could not be computed.
    pub fn unavailable(source: EvidenceSource, weight: f64, summary: impl Into<String>) -> Self {
        Self {
            source,
            direction: EvidenceDirection::Neutral,
            weight,
            score: 0.0,
            summary: summary.into(),
            raw: None,
        }
    }

    /// Whether the underlying metric was actually computed.
    pub fn was_computed(&self) -> bool {
        self.raw.is_some()
    }
}

/// Classify a score against symmetric thresholds.
pub(crate) fn direction_for(score: f64, threshold: f64) -> EvidenceDirection {
    if score > threshold {
        EvidenceDirection::Bullish
    } else if score < -threshold {
        EvidenceDirection::Bearish
    } else {
        EvidenceDirection::Neutral
    }
}
