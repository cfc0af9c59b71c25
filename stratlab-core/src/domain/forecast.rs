//! Forecast input — an opaque predicted close from an external model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the forecast was produced. The engine treats every method
/// identically; the label exists for the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    Ml,
    Naive,
    Sma,
}

/// A single-scalar close forecast supplied by an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub symbol: String,
    pub target_date: NaiveDate,
    pub method: ForecastMethod,
    pub predicted_close: f64,
    pub model_artifact_id: Option<String>,
    pub is_model_stale: bool,
}

impl ForecastResult {
    pub fn new(
        symbol: impl Into<String>,
        target_date: NaiveDate,
        method: ForecastMethod,
        predicted_close: f64,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            target_date,
            method,
            predicted_close,
            model_artifact_id: None,
            is_model_stale: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_method_wire_names() {
        let json = serde_json::to_string(&ForecastMethod::Naive).unwrap();
        assert_eq!(json, "\"naive\"");
    }

    #[test]
    fn forecast_uppercases_symbol() {
        let f = ForecastResult::new(
            "comi",
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            ForecastMethod::Ml,
            55.0,
        );
        assert_eq!(f.symbol, "COMI");
    }
}
