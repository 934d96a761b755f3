//! Unit tests for the mode-to-bias mapping and response assembly.

#[cfg(test)]
mod engine_tests {
    use crate::engine::*;
    use crate::schemas::{AnalysisMode, AnalysisRequest};

    const EPS: f64 = 1e-9;

    fn analyze(query: &str, mode: AnalysisMode) -> crate::schemas::AnalysisResponse {
        generate_analysis(&AnalysisRequest::new(query, Some(mode)).unwrap())
    }

    // ============= mode_bias Tests =============

    #[test]
    fn test_bias_sums_to_one_for_every_mode() {
        for mode in AnalysisMode::ALL {
            let (bull, neutral, bear) = mode_bias(mode);
            assert!((bull + neutral + bear - 1.0).abs() < EPS, "{} does not sum to 1", mode);
        }
    }

    #[test]
    fn test_mode_biases_are_distinct() {
        let quant = mode_bias(AnalysisMode::Quant);
        let buffett = mode_bias(AnalysisMode::Buffett);
        let dalio = mode_bias(AnalysisMode::Dalio);

        assert_ne!(quant, buffett);
        assert_ne!(quant, dalio);
        assert_ne!(buffett, dalio);
    }

    #[test]
    fn test_buffett_bias() {
        assert_eq!(mode_bias(AnalysisMode::Buffett), (0.45, 0.35, 0.20));
    }

    #[test]
    fn test_dalio_bias() {
        assert_eq!(mode_bias(AnalysisMode::Dalio), (0.35, 0.40, 0.25));
    }

    #[test]
    fn test_quant_bias() {
        assert_eq!(mode_bias(AnalysisMode::Quant), (0.50, 0.30, 0.20));
    }

    // ============= generate_analysis Tests =============

    #[test]
    fn test_probabilities_sum_to_one_quant_mode() {
        let response = analyze("Gold ETF", AnalysisMode::Quant);
        assert!((response.directional_probability.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_gold_etf_quant_response() {
        let response = analyze("Gold ETF", AnalysisMode::Quant);

        assert_eq!(response.instrument, "Gold ETF");
        assert_eq!(response.mode, AnalysisMode::Quant);
        assert_eq!(response.directional_probability.as_tuple(), (0.50, 0.30, 0.20));
    }

    #[test]
    fn test_response_probabilities_follow_mode() {
        for mode in AnalysisMode::ALL {
            let response = analyze("SPY", mode);
            assert_eq!(response.mode, mode);
            assert_eq!(response.directional_probability.as_tuple(), mode_bias(mode));
        }
    }

    #[test]
    fn test_attribution_weights_sum_to_one() {
        for mode in AnalysisMode::ALL {
            let response = analyze("QQQ", mode);
            let total: f64 = response.signal_attribution.iter().map(|a| a.weight).sum();
            assert_eq!(response.signal_attribution.len(), 4);
            assert!((total - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_attribution_weights_in_order() {
        let response = analyze("QQQ", AnalysisMode::Dalio);
        let weights: Vec<f64> = response.signal_attribution.iter().map(|a| a.weight).collect();
        assert_eq!(weights, vec![0.35, 0.30, 0.20, 0.15]);
        assert_eq!(response.signal_attribution[0].signal, "Technical momentum");
    }

    #[test]
    fn test_scenario_probabilities_sum_to_one() {
        let response = analyze("BTC", AnalysisMode::Buffett);
        let probs: Vec<f64> = response.scenarios.iter().map(|s| s.probability).collect();
        assert_eq!(probs, vec![0.55, 0.25, 0.20]);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_fixed_commentary_shape() {
        let response = analyze("EURUSD", AnalysisMode::Quant);

        assert_eq!(response.confidence_score, 0.69);
        assert_eq!(response.key_risk_factors.len(), 3);
        assert_eq!(response.conflicting_indicators.len(), 2);
        assert_eq!(response.scenarios.len(), 3);
        assert_eq!(response.strategy_suggestions.len(), 3);
    }

    #[test]
    fn test_commentary_is_mode_independent() {
        let buffett = analyze("TSLA", AnalysisMode::Buffett);
        let dalio = analyze("TSLA", AnalysisMode::Dalio);

        assert_eq!(buffett.signal_attribution, dalio.signal_attribution);
        assert_eq!(buffett.scenarios, dalio.scenarios);
        assert_eq!(buffett.key_risk_factors, dalio.key_risk_factors);
        assert_eq!(buffett.strategy_suggestions, dalio.strategy_suggestions);
    }

    #[test]
    fn test_instrument_echoed_verbatim() {
        let response = analyze("  s&p 500 futures ", AnalysisMode::Quant);
        assert_eq!(response.instrument, "  s&p 500 futures ");
    }

    #[test]
    fn test_generated_response_passes_validation() {
        for mode in AnalysisMode::ALL {
            assert!(analyze("NVDA", mode).validate().is_ok());
        }
    }
}
