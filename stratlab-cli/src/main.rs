//! StratLab CLI — risk, validation, and recommendation commands.
//!
//! Commands:
//! - `recommend` — full strategy recommendation for one CSV bar file
//! - `risk` — VaR/Sharpe snapshot
//! - `validate` — ADF + Hurst diagnostics
//! - `scan` — recommendations for every CSV in a directory, in parallel

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use stratlab_core::domain::{ForecastMethod, ForecastResult};
use stratlab_core::risk::compute_risk_snapshot;
use stratlab_core::validation::compute_validation;
use stratlab_core::{EngineConfig, StrategyEngine};

mod bars;
mod report;

#[derive(Parser)]
#[command(name = "stratlab", about = "StratLab CLI — strategy recommendation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a strategy recommendation from a CSV bar file.
    Recommend {
        /// CSV file with date,open,high,low,close[,volume[,adjusted_close]] rows.
        #[arg(long)]
        bars: PathBuf,

        /// Symbol override. Defaults to the uppercased file stem.
        #[arg(long)]
        symbol: Option<String>,

        /// Forecast price from an external model (optional).
        #[arg(long)]
        forecast: Option<f64>,

        /// Forecast method label: ml, naive, or sma.
        #[arg(long, default_value = "ml")]
        forecast_method: String,

        /// TOML file overriding the engine configuration.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compute the VaR/Sharpe risk snapshot.
    Risk {
        #[arg(long)]
        bars: PathBuf,

        #[arg(long)]
        symbol: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run the ADF + Hurst statistical validation.
    Validate {
        #[arg(long)]
        bars: PathBuf,

        #[arg(long)]
        symbol: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Recommend for every CSV file in a directory (parallel, one
    /// symbol's failure never stops the rest).
    Scan {
        /// Directory containing CSV bar files.
        #[arg(long)]
        dir: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Recommend {
            bars,
            symbol,
            forecast,
            forecast_method,
            config,
            json,
        } => {
            let engine = build_engine(config.as_deref())?;
            let series = bars::load_series(&bars, symbol.as_deref())?;
            let forecast = forecast
                .map(|price| {
                    build_forecast(series.symbol(), series.latest_bar().date, &forecast_method, price)
                })
                .transpose()?;
            let rec = engine.recommend(&series, forecast.as_ref());
            if json {
                println!("{}", serde_json::to_string_pretty(&rec)?);
            } else {
                report::print_recommendation(&rec);
            }
        }
        Commands::Risk {
            bars,
            symbol,
            config,
            json,
        } => {
            let engine = build_engine(config.as_deref())?;
            let series = bars::load_series(&bars, symbol.as_deref())?;
            let snapshot = compute_risk_snapshot(&series, &engine.config().risk);
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                report::print_risk(&snapshot);
            }
        }
        Commands::Validate {
            bars,
            symbol,
            config,
            json,
        } => {
            let engine = build_engine(config.as_deref())?;
            let series = bars::load_series(&bars, symbol.as_deref())?;
            let result = compute_validation(&series, &engine.config().validation);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                report::print_validation(&result);
            }
        }
        Commands::Scan { dir, config, json } => {
            scan_directory(&dir, config.as_deref(), json)?;
        }
    }
    Ok(())
}

/// Build the engine from an optional TOML override file.
fn build_engine(config_path: Option<&Path>) -> Result<StrategyEngine> {
    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<EngineConfig>(&text)
                .with_context(|| format!("invalid engine config in {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    StrategyEngine::new(config).context("engine configuration rejected")
}

fn build_forecast(
    symbol: &str,
    target_date: NaiveDate,
    method: &str,
    predicted_close: f64,
) -> Result<ForecastResult> {
    let method = match method {
        "ml" => ForecastMethod::Ml,
        "naive" => ForecastMethod::Naive,
        "sma" => ForecastMethod::Sma,
        other => anyhow::bail!("unknown forecast method '{other}' (expected ml, naive, or sma)"),
    };
    Ok(ForecastResult::new(symbol, target_date, method, predicted_close))
}

/// Recommend for every CSV file in a directory.
///
/// Files are processed in parallel; each file's failure is reported and
/// isolated from the rest.
fn scan_directory(dir: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let engine = build_engine(config_path)?;

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("csv"))
        .collect();
    files.sort();
    anyhow::ensure!(!files.is_empty(), "no CSV files in {}", dir.display());

    let total = files.len();
    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let outcome = bars::load_series(path, None)
                .map(|series| engine.recommend(&series, None));
            (path.clone(), outcome)
        })
        .collect();

    let mut succeeded = 0usize;
    for (path, outcome) in &results {
        match outcome {
            Ok(rec) => {
                succeeded += 1;
                if json {
                    println!("{}", serde_json::to_string(rec)?);
                } else {
                    println!(
                        "OK   {}: {} (conviction {}%)",
                        rec.symbol, rec.action, rec.conviction
                    );
                }
            }
            Err(e) => {
                eprintln!("FAIL {}: {e:#}", path.display());
            }
        }
    }
    if !json {
        println!("\nScan complete: {succeeded}/{total} succeeded, {} failed", total - succeeded);
    }
    Ok(())
}
