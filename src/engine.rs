//! Mode-driven commentary engine
//!
//! A pure mapping: the mode picks the directional bias, everything else is
//! the fixed commentary bundle from `constants::commentary`.

use tracing::debug;

use crate::constants::{bias, commentary};
use crate::schemas::{
    AnalysisMode, AnalysisRequest, AnalysisResponse, DirectionalProbability, Scenario,
    SignalAttribution,
};

/// (bullish, neutral, bearish) for a mode
pub fn mode_bias(mode: AnalysisMode) -> (f64, f64, f64) {
    match mode {
        AnalysisMode::Buffett => bias::BUFFETT,
        AnalysisMode::Dalio => bias::DALIO,
        // Quant, and any lens added later without its own triple
        _ => bias::QUANT,
    }
}

pub fn generate_analysis(request: &AnalysisRequest) -> AnalysisResponse {
    let (bullish, neutral, bearish) = mode_bias(request.mode());
    debug!(
        instrument = request.query(),
        mode = %request.mode(),
        bullish, neutral, bearish,
        "Assembling analysis"
    );

    let signal_attribution = commentary::SIGNAL_ATTRIBUTIONS
        .iter()
        .map(|(signal, weight, rationale)| SignalAttribution {
            signal: signal.to_string(),
            weight: *weight,
            rationale: rationale.to_string(),
        })
        .collect();

    let scenarios = commentary::SCENARIOS
        .iter()
        .map(|(name, probability, implication)| Scenario {
            name: name.to_string(),
            probability: *probability,
            implication: implication.to_string(),
        })
        .collect();

    AnalysisResponse {
        instrument: request.query().to_string(),
        mode: request.mode(),
        directional_probability: DirectionalProbability {
            bullish,
            neutral,
            bearish,
        },
        confidence_score: commentary::CONFIDENCE_SCORE,
        key_risk_factors: to_strings(&commentary::KEY_RISK_FACTORS),
        signal_attribution,
        conflicting_indicators: to_strings(&commentary::CONFLICTING_INDICATORS),
        scenarios,
        strategy_suggestions: to_strings(&commentary::STRATEGY_SUGGESTIONS),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
