//! PriceBar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured errors for domain-type construction.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid bar on {date}: {reason}")]
    InvalidBar { date: NaiveDate, reason: String },

    #[error("price series for '{symbol}' has no bars")]
    EmptySeries { symbol: String },
}

/// OHLCV bar for a single symbol on a single day.
///
/// Constructed by external data collaborators; the core validates on
/// series construction and never mutates a bar afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
    pub adjusted_close: Option<f64>,
}

impl PriceBar {
    /// Check the OHLC envelope: all prices positive, high is the ceiling,
    /// low is the floor.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidBar {
            date: self.date,
            reason: reason.to_string(),
        };

        for (name, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(&format!("{name} must be a positive number, got {value}")));
            }
        }
        if let Some(v) = self.volume {
            if !v.is_finite() || v < 0.0 {
                return Err(invalid(&format!("volume must be non-negative, got {v}")));
            }
        }
        if let Some(a) = self.adjusted_close {
            if !a.is_finite() || a <= 0.0 {
                return Err(invalid(&format!("adjusted_close must be positive, got {a}")));
            }
        }
        if self.high < self.open.max(self.close).max(self.low) {
            return Err(invalid("high must be >= max(open, close, low)"));
        }
        if self.low > self.open.min(self.close).min(self.high) {
            return Err(invalid("low must be <= min(open, close, high)"));
        }
        Ok(())
    }
}
