//! Fixed values used by the analysis engine and the HTTP layer
//!
//! The commentary bundle is pre-authored: everything the engine returns apart
//! from the instrument, the mode and the bias triple lives here.

/// Directional bias per mode, as (bullish, neutral, bearish)
pub mod bias {
    pub const BUFFETT: (f64, f64, f64) = (0.45, 0.35, 0.20);
    pub const DALIO: (f64, f64, f64) = (0.35, 0.40, 0.25);
    pub const QUANT: (f64, f64, f64) = (0.50, 0.30, 0.20);
}

/// Mode-independent commentary
pub mod commentary {
    pub const CONFIDENCE_SCORE: f64 = 0.69;

    /// (signal, weight, rationale); weights sum to 1.0
    pub const SIGNAL_ATTRIBUTIONS: [(&str, f64, &str); 4] = [
        (
            "Technical momentum",
            0.35,
            "Price trend remains above medium-term baseline.",
        ),
        (
            "Macro regime",
            0.30,
            "Growth and liquidity conditions are mixed but stable.",
        ),
        (
            "News sentiment",
            0.20,
            "Recent narrative flow is slightly constructive.",
        ),
        (
            "Risk conditions",
            0.15,
            "Volatility has cooled but tail-risk remains elevated.",
        ),
    ];

    pub const KEY_RISK_FACTORS: [&str; 3] = [
        "Macro surprise risk (inflation / rates)",
        "Event-driven gap risk from headlines",
        "Cross-asset correlation spikes",
    ];

    pub const CONFLICTING_INDICATORS: [&str; 2] = [
        "Constructive momentum vs fragile macro breadth",
        "Positive narrative flow vs cautious positioning",
    ];

    /// (name, probability, implication); probabilities sum to 1.0
    pub const SCENARIOS: [(&str, f64, &str); 3] = [
        (
            "Base case",
            0.55,
            "Range-up drift with moderate volatility.",
        ),
        (
            "Risk-off drawdown",
            0.25,
            "Short, sharp downside if macro surprise hits.",
        ),
        (
            "Breakout continuation",
            0.20,
            "Sustained trend extension on supportive catalysts.",
        ),
    ];

    pub const STRATEGY_SUGGESTIONS: [&str; 3] = [
        "Favor risk-defined entries over directional leverage.",
        "Scale exposure on confirmation rather than anticipation.",
        "Monitor macro event calendar for regime shifts.",
    ];
}

/// Field constraints
pub mod limits {
    pub const MIN_QUERY_CHARS: usize = 2;
    pub const MIN_UNIT: f64 = 0.0;
    pub const MAX_UNIT: f64 = 1.0;
}

/// Service identity reported by `GET /`
pub mod service {
    pub const NAME: &str = "Cenex AI API";
    pub const DESCRIPTION: &str = "MVP market intelligence API scaffold for Cenex AI.";
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
