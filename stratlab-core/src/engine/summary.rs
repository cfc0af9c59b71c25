//! Human-readable logic summary.

use crate::validation::HurstRegime;

use super::evidence::EvidenceSignal;
use super::recommendation::StrategyAction;

/// Build the one-paragraph explanation: action + conviction, regime when
/// known, the top two bullish and bearish signals by |score|, and an
/// explicit HOLD note when no directional evidence exists at all.
pub(crate) fn build_logic_summary(
    action: StrategyAction,
    conviction: u8,
    regime: Option<HurstRegime>,
    bullish: &[EvidenceSignal],
    bearish: &[EvidenceSignal],
) -> String {
    let mut parts = vec![format!("{action} (conviction {conviction}%).")];

    if let Some(regime) = regime {
        parts.push(format!("Market regime: {regime}."));
    }

    if let Some(top) = top_summaries(bullish) {
        parts.push(format!("Bullish: {top}"));
    }
    if let Some(top) = top_summaries(bearish) {
        parts.push(format!("Bearish: {top}"));
    }

    if action == StrategyAction::Hold && bullish.is_empty() && bearish.is_empty() {
        parts.push("Insufficient or conflicting signals – defaulting to HOLD.".to_string());
    }

    parts.join(" ")
}

fn top_summaries(evidence: &[EvidenceSignal]) -> Option<String> {
    if evidence.is_empty() {
        return None;
    }
    let mut sorted: Vec<&EvidenceSignal> = evidence.iter().collect();
    sorted.sort_by(|a, b| {
        b.score
            .abs()
            .partial_cmp(&a.score.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let labels: Vec<&str> = sorted.iter().take(2).map(|e| e.summary.as_str()).collect();
    Some(labels.join(" "))
}
