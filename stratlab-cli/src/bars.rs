//! CSV bar ingestion — the CLI's stand-in for a data provider.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use stratlab_core::domain::{PriceBar, PriceSeries, SourceRecord};

/// One CSV row: `date,open,high,low,close[,volume[,adjusted_close]]`.
#[derive(Debug, Deserialize)]
struct CsvBar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
    #[serde(default)]
    adjusted_close: Option<f64>,
}

/// Load a price series from a CSV file.
///
/// The symbol defaults to the uppercased file stem when not supplied.
/// Sorting and duplicate-date handling happen inside `PriceSeries::new`.
pub fn load_series(path: &Path, symbol: Option<&str>) -> Result<PriceSeries> {
    let symbol = match symbol {
        Some(s) => s.to_string(),
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_uppercase())
            .context("cannot derive a symbol from the file name; pass --symbol")?,
    };

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut bars = Vec::new();
    for (i, row) in reader.deserialize::<CsvBar>().enumerate() {
        let row = row.with_context(|| format!("bad CSV row {} in {}", i + 2, path.display()))?;
        bars.push(PriceBar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
            adjusted_close: row.adjusted_close,
        });
    }
    if bars.is_empty() {
        bail!("{} contains no bars", path.display());
    }

    let range_start = bars.iter().map(|b| b.date).min().expect("bars not empty");
    let range_end = bars.iter().map(|b| b.date).max().expect("bars not empty");
    let fetched_at = chrono::Local::now().naive_local();
    let source = SourceRecord {
        provider: "csv_import".to_string(),
        fetched_at,
        range_start,
        range_end,
    };

    PriceSeries::new(symbol, bars, source, fetched_at)
        .with_context(|| format!("invalid bar data in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_minimal_csv() {
        let file = write_csv(
            "date,open,high,low,close\n\
             2024-01-02,100.0,105.0,99.0,104.0\n\
             2024-01-03,104.0,106.0,103.0,105.0\n",
        );
        let series = load_series(file.path(), Some("SPY")).unwrap();
        assert_eq!(series.symbol(), "SPY");
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest_close(), 105.0);
    }

    #[test]
    fn loads_csv_with_volume_and_adjusted_close() {
        let file = write_csv(
            "date,open,high,low,close,volume,adjusted_close\n\
             2024-01-02,100.0,105.0,99.0,104.0,1000,104.0\n",
        );
        let series = load_series(file.path(), Some("X")).unwrap();
        assert_eq!(series.bars()[0].volume, Some(1000.0));
    }

    #[test]
    fn unsorted_rows_are_sorted() {
        let file = write_csv(
            "date,open,high,low,close\n\
             2024-01-03,104.0,106.0,103.0,105.0\n\
             2024-01-02,100.0,105.0,99.0,104.0\n",
        );
        let series = load_series(file.path(), Some("X")).unwrap();
        assert_eq!(
            series.bars()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = write_csv("date,open,high,low,close\n");
        assert!(load_series(file.path(), Some("X")).is_err());
    }

    #[test]
    fn invalid_envelope_is_an_error() {
        let file = write_csv(
            "date,open,high,low,close\n\
             2024-01-02,100.0,95.0,99.0,104.0\n",
        );
        assert!(load_series(file.path(), Some("X")).is_err());
    }
}
