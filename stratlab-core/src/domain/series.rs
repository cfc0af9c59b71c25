//! PriceSeries — validated, date-ordered bar history for one symbol.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::bar::{DomainError, PriceBar};

/// Data provenance attached to a series by the retrieval collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub provider: String,
    pub fetched_at: NaiveDateTime,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
}

/// Ordered bar history for a single symbol.
///
/// Construction normalizes the input: the symbol is uppercased, every bar
/// is validated, bars are sorted ascending by date, and duplicate dates
/// are collapsed with last-write-wins. Fields are private so the sorted
/// invariant cannot be broken after construction — indicator and return
/// code never re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
    source: SourceRecord,
    last_updated_at: NaiveDateTime,
}

impl PriceSeries {
    pub fn new(
        symbol: impl Into<String>,
        bars: Vec<PriceBar>,
        source: SourceRecord,
        last_updated_at: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        let symbol = symbol.into().to_uppercase();
        if bars.is_empty() {
            return Err(DomainError::EmptySeries { symbol });
        }

        // Sort + dedupe in one pass: later input wins on a duplicate date.
        let mut by_date: BTreeMap<NaiveDate, PriceBar> = BTreeMap::new();
        for bar in bars {
            bar.validate()?;
            by_date.insert(bar.date, bar);
        }

        Ok(Self {
            symbol,
            bars: by_date.into_values().collect(),
            source,
            last_updated_at,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Bars sorted ascending by date, one per date.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn source(&self) -> &SourceRecord {
        &self.source
    }

    pub fn last_updated_at(&self) -> NaiveDateTime {
        self.last_updated_at
    }

    pub fn latest_bar(&self) -> &PriceBar {
        self.bars.last().expect("series has at least one bar")
    }

    pub fn latest_close(&self) -> f64 {
        self.latest_bar().close
    }

    /// Close prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: NaiveDate, close: f64) -> PriceBar {
        PriceBar {
            date,
            open: close * 0.99,
            high: close * 1.01,
            low: close * 0.98,
            close,
            volume: Some(1000.0),
            adjusted_close: None,
        }
    }

    fn source() -> SourceRecord {
        SourceRecord {
            provider: "test".into(),
            fetched_at: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            range_start: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            range_end: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn series_sorts_bars_by_date() {
        let bars = vec![bar(date(4), 103.0), bar(date(2), 101.0), bar(date(3), 102.0)];
        let series =
            PriceSeries::new("spy", bars, source(), source().fetched_at).unwrap();
        let dates: Vec<NaiveDate> = series.bars().iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![date(2), date(3), date(4)]);
        assert_eq!(series.latest_close(), 103.0);
    }

    #[test]
    fn series_uppercases_symbol() {
        let series =
            PriceSeries::new("spy", vec![bar(date(2), 100.0)], source(), source().fetched_at)
                .unwrap();
        assert_eq!(series.symbol(), "SPY");
    }

    #[test]
    fn series_dedupes_last_write_wins() {
        let bars = vec![bar(date(2), 100.0), bar(date(3), 105.0), bar(date(3), 106.0)];
        let series =
            PriceSeries::new("SPY", bars, source(), source().fetched_at).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest_close(), 106.0);
    }

    #[test]
    fn series_rejects_empty() {
        let err = PriceSeries::new("SPY", vec![], source(), source().fetched_at);
        assert!(matches!(err, Err(DomainError::EmptySeries { .. })));
    }

    #[test]
    fn series_rejects_invalid_bar() {
        let mut bad = bar(date(2), 100.0);
        bad.high = 1.0;
        let err = PriceSeries::new("SPY", vec![bad], source(), source().fetched_at);
        assert!(matches!(err, Err(DomainError::InvalidBar { .. })));
    }
}
