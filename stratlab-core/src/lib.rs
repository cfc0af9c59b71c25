//! StratLab Core — quantitative risk & strategy recommendation engine.
//!
//! This crate fuses four independent evidence streams into one risk-first
//! recommendation for a single equity:
//! - A learned price forecast (opaque scalar from an external model)
//! - Technical indicators (RSI, MACD, EMA)
//! - A market-regime classifier (Hurst exponent)
//! - A downside-risk estimate (historical VaR)
//!
//! The whole core is synchronous and side-effect-free: no locks, no I/O,
//! no shared mutable state. Every recommendation is a pure function of
//! its inputs and safe to invoke concurrently.

pub mod domain;
pub mod engine;
pub mod indicators;
pub mod returns;
pub mod risk;
pub mod validation;

pub use domain::{DomainError, ForecastMethod, ForecastResult, PriceBar, PriceSeries, SourceRecord};
pub use engine::{
    EngineConfig, EngineConfigError, EnsembleWeights, EvidenceDirection, EvidenceSignal,
    EvidenceSource, RawMetric, StrategyAction, StrategyEngine, StrategyRecommendation, TradePlan,
};
pub use returns::ReturnType;
pub use risk::{compute_risk_snapshot, RiskMetricsSnapshot, RiskParams};
pub use validation::{
    compute_validation, HurstRegime, StatisticalValidationResult, ValidationParams,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: every public type handed across threads by
    /// batch callers is Send + Sync. Per-symbol fan-out in callers
    /// depends on it.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<PriceBar>();
        require_sync::<PriceBar>();
        require_send::<PriceSeries>();
        require_sync::<PriceSeries>();
        require_send::<SourceRecord>();
        require_sync::<SourceRecord>();
        require_send::<ForecastResult>();
        require_sync::<ForecastResult>();

        require_send::<RiskMetricsSnapshot>();
        require_sync::<RiskMetricsSnapshot>();
        require_send::<StatisticalValidationResult>();
        require_sync::<StatisticalValidationResult>();

        require_send::<EngineConfig>();
        require_sync::<EngineConfig>();
        require_send::<StrategyEngine>();
        require_sync::<StrategyEngine>();
        require_send::<StrategyRecommendation>();
        require_sync::<StrategyRecommendation>();
        require_send::<EvidenceSignal>();
        require_sync::<EvidenceSignal>();
    }
}
