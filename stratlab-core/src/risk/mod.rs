//! Risk metrics — historical VaR and annualized Sharpe ratio.
//!
//! All functions are pure: return sequence in, Option-gated scalar out.
//! Below the minimum observation floor every metric is `None` (recorded
//! as a warning on the snapshot, never an error).

pub mod snapshot;
pub mod var;

pub use snapshot::{compute_risk_snapshot, RiskMetricsSnapshot, RiskParams};
pub use var::{compute_sharpe, compute_var};

/// Default lookback window for the risk snapshot (about one trading year).
pub const DEFAULT_LOOKBACK_DAYS: usize = 252;

/// Minimum return observations for VaR/Sharpe.
pub const MIN_OBSERVATIONS: usize = 60;

/// Trading days per year used to annualize the Sharpe ratio.
pub const ANNUALIZATION_FACTOR: f64 = 252.0;

/// Estimation method recorded on every snapshot.
pub const VAR_METHOD: &str = "historical";
