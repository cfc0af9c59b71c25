//! Entry zone, stop-loss, and regime-conditional target exit.

use crate::domain::{ForecastResult, PriceSeries};
use crate::indicators::{ema, last_finite, TREND_EMA_PERIOD};
use crate::validation::HurstRegime;

use super::recommendation::{StrategyAction, TradePlan};
use super::signals::round_to;

/// Build the price levels for a non-HOLD action.
///
/// Entry zone and stop-loss are pure functions of the risk distance. The
/// target exit is regime-conditional: trending (or unknown) extends
/// toward the forecast capped at 4×rd, mean-reverting reverts toward
/// EMA(50) when it lies on the favorable side, else a 1.5×rd move.
pub(crate) fn build_trade_plan(
    action: StrategyAction,
    current_price: f64,
    risk_distance: f64,
    regime: Option<HurstRegime>,
    forecast: Option<&ForecastResult>,
    series: &PriceSeries,
) -> TradePlan {
    let rd = risk_distance;
    let (entry_lower, entry_upper, stop_loss) = match action {
        StrategyAction::Buy => {
            let lower = current_price * (1.0 - rd);
            let upper = current_price * (1.0 + 0.25 * rd);
            (lower, upper, lower * (1.0 - rd))
        }
        StrategyAction::Sell => {
            let lower = current_price * (1.0 - 0.25 * rd);
            let upper = current_price * (1.0 + rd);
            (lower, upper, upper * (1.0 + rd))
        }
        StrategyAction::Hold => unreachable!("levels are only built for BUY/SELL"),
    };

    let target_exit = compute_target(action, current_price, rd, regime, forecast, series);

    TradePlan {
        entry_zone_lower: round_to(entry_lower, 4),
        entry_zone_upper: round_to(entry_upper, 4),
        target_exit: round_to(target_exit, 4),
        stop_loss: round_to(stop_loss, 4),
        risk_distance_pct: round_to(rd * 100.0, 4),
    }
}

fn compute_target(
    action: StrategyAction,
    current_price: f64,
    rd: f64,
    regime: Option<HurstRegime>,
    forecast: Option<&ForecastResult>,
    series: &PriceSeries,
) -> f64 {
    let ml_price = forecast.map(|f| f.predicted_close);

    match regime {
        // Unknown regime defaults to trend-following.
        Some(HurstRegime::Trending) | Some(HurstRegime::RandomLike) | None => match action {
            StrategyAction::Buy => {
                let cap = current_price * (1.0 + 4.0 * rd);
                ml_price.map_or(cap, |p| p.min(cap))
            }
            _ => {
                let floor = current_price * (1.0 - 4.0 * rd);
                ml_price.map_or(floor, |p| p.max(floor))
            }
        },
        Some(HurstRegime::MeanReverting) => {
            let ema_val =
                last_finite(&ema(series, TREND_EMA_PERIOD)).unwrap_or(current_price);
            match action {
                StrategyAction::Buy => {
                    if ema_val > current_price {
                        ema_val
                    } else {
                        current_price * (1.0 + 1.5 * rd)
                    }
                }
                _ => {
                    if ema_val < current_price {
                        ema_val
                    } else {
                        current_price * (1.0 - 1.5 * rd)
                    }
                }
            }
        }
    }
}
