//! Strategy engine — blends four evidence streams into one risk-first
//! recommendation.
//!
//! Pipeline per call:
//!
//! 1. ML signal: forecast vs current close
//! 2. Technical signal: RSI / MACD / EMA composite
//! 3. Regime signal: Hurst classification
//! 4. Risk signal: 1-day 95% VaR
//!
//! Blend with disclosed weights, derive conviction from cross-source
//! agreement, pick BUY/SELL/HOLD, and attach price levels plus the full
//! evidence panel. Ties and missing inputs fall back to HOLD.

pub mod config;
pub mod evidence;
pub mod recommendation;
pub mod strategy;

mod levels;
mod signals;
mod summary;

pub use config::{EngineConfig, EngineConfigError, EnsembleWeights};
pub use evidence::{EvidenceDirection, EvidenceSignal, EvidenceSource, RawMetric};
pub use recommendation::{
    RawInputs, ScoreBreakdown, StrategyAction, StrategyRecommendation, TradePlan,
};
pub use strategy::StrategyEngine;
