//! Plain-text rendering of core outputs.

use stratlab_core::{
    RiskMetricsSnapshot, StatisticalValidationResult, StrategyRecommendation,
};

pub fn print_recommendation(rec: &StrategyRecommendation) {
    println!("{} — {} (as of {})", rec.symbol, rec.action, rec.as_of_date);
    println!("  conviction: {}%", rec.conviction);
    match rec.regime {
        Some(regime) => println!("  regime: {regime}"),
        None => println!("  regime: unknown"),
    }

    match &rec.plan {
        Some(plan) => {
            println!(
                "  entry zone: {:.4} – {:.4}",
                plan.entry_zone_lower, plan.entry_zone_upper
            );
            println!("  target exit: {:.4}", plan.target_exit);
            println!("  stop loss: {:.4}", plan.stop_loss);
            println!("  risk distance: {:.2}%", plan.risk_distance_pct);
        }
        None => println!("  levels: n/a (HOLD)"),
    }

    for (label, bucket) in [
        ("bullish", &rec.evidence_bullish),
        ("bearish", &rec.evidence_bearish),
        ("neutral", &rec.evidence_neutral),
    ] {
        if bucket.is_empty() {
            continue;
        }
        println!("  {label}:");
        for e in bucket {
            println!("    [{:+.2}] {}", e.score, e.summary);
        }
    }

    println!("  {}", rec.logic_summary);
}

pub fn print_risk(snapshot: &RiskMetricsSnapshot) {
    println!(
        "{} — risk snapshot (as of {}, {} obs)",
        snapshot.symbol, snapshot.as_of_date, snapshot.lookback_days
    );
    print_metric_pct("VaR 95%", snapshot.var_95_pct);
    print_metric_pct("VaR 99%", snapshot.var_99_pct);
    match (snapshot.var_95_abs, snapshot.var_99_abs) {
        (Some(a95), Some(a99)) => println!("  absolute: {a95:.4} / {a99:.4}"),
        _ => {}
    }
    match snapshot.sharpe {
        Some(s) => println!("  Sharpe: {s:.3} (rf = {})", snapshot.risk_free_rate),
        None => println!("  Sharpe: n/a"),
    }
    print_warnings(&snapshot.warnings);
}

pub fn print_validation(result: &StatisticalValidationResult) {
    println!(
        "{} — statistical validation (as of {}, {} obs, {})",
        result.symbol, result.as_of_date, result.lookback_days, result.series_tested
    );
    match (result.adf.statistic, result.adf.pvalue) {
        (Some(stat), Some(p)) => {
            println!("  ADF: statistic {stat:.4}, p-value {p:.4}");
            if let Some(crit) = result.adf.critical_values {
                println!(
                    "       critical values: 1% {:.3}, 5% {:.3}, 10% {:.3}",
                    crit.pct_1, crit.pct_5, crit.pct_10
                );
            }
        }
        _ => println!("  ADF: n/a"),
    }
    match (result.hurst.hurst, result.hurst.regime) {
        (Some(h), Some(regime)) => {
            let r2 = result
                .hurst
                .r_squared
                .map(|r| format!("{r:.3}"))
                .unwrap_or_else(|| "n/a".to_string());
            println!("  Hurst: {h:.3} ({regime}, R² {r2})");
        }
        _ => println!("  Hurst: n/a"),
    }
    print_warnings(&result.warnings);
}

fn print_metric_pct(label: &str, value: Option<f64>) {
    match value {
        Some(v) => println!("  {label}: {:+.2}%", v * 100.0),
        None => println!("  {label}: n/a"),
    }
}

fn print_warnings(warnings: &[String]) {
    for w in warnings {
        println!("  warning: {w}");
    }
}
