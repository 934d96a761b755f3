//! Request and response shapes for the analysis endpoint
//!
//! `AnalysisRequest` can only be built through validation, so the engine never
//! sees a query that is too short or a mode outside the closed set.

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::limits::{MAX_UNIT, MIN_QUERY_CHARS, MIN_UNIT};
use crate::error::ValidationError;

/// Strategy lens that selects the directional bias
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Buffett,
    Dalio,
    #[default]
    Quant,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 3] = [AnalysisMode::Buffett, AnalysisMode::Dalio, AnalysisMode::Quant];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Buffett => "buffett",
            AnalysisMode::Dalio => "dalio",
            AnalysisMode::Quant => "quant",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buffett" => Ok(AnalysisMode::Buffett),
            "dalio" => Ok(AnalysisMode::Dalio),
            "quant" => Ok(AnalysisMode::Quant),
            other => Err(ValidationError::new(
                "mode",
                format!("'{}' is not one of 'buffett', 'dalio', 'quant'", other),
            )),
        }
    }
}

/// How the `mode` key appeared in the request body
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ModeInput {
    #[default]
    Omitted,
    Null,
    Given(String),
}

/// Request body as it arrives on the wire, before any constraint is checked.
///
/// Only a JSON object deserializes into this; arrays and scalars are rejected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawAnalysisRequest {
    pub query: Option<String>,
    pub mode: ModeInput,
}

impl<'de> Deserialize<'de> for RawAnalysisRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawRequestVisitor)
    }
}

struct RawRequestVisitor;

impl<'de> Visitor<'de> for RawRequestVisitor {
    type Value = RawAnalysisRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object with a `query` string and an optional `mode` string")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut raw = RawAnalysisRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "query" => raw.query = map.next_value()?,
                "mode" => {
                    raw.mode = match map.next_value::<Option<String>>()? {
                        Some(mode) => ModeInput::Given(mode),
                        None => ModeInput::Null,
                    }
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(raw)
    }
}

/// A validated analysis request
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisRequest {
    query: String,
    mode: AnalysisMode,
}

impl AnalysisRequest {
    /// Build a request, defaulting to `Quant` when no mode is given.
    pub fn new(query: impl Into<String>, mode: Option<AnalysisMode>) -> Result<Self, ValidationError> {
        let query = query.into();
        let chars = query.chars().count();
        if chars < MIN_QUERY_CHARS {
            return Err(ValidationError::new(
                "query",
                format!("must be at least {} characters, got {}", MIN_QUERY_CHARS, chars),
            ));
        }

        Ok(Self {
            query,
            mode: mode.unwrap_or_default(),
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }
}

impl TryFrom<RawAnalysisRequest> for AnalysisRequest {
    type Error = ValidationError;

    fn try_from(raw: RawAnalysisRequest) -> Result<Self, Self::Error> {
        let query = raw
            .query
            .ok_or_else(|| ValidationError::new("query", "field required"))?;
        let mode = match raw.mode {
            ModeInput::Omitted => None,
            ModeInput::Null => {
                return Err(ValidationError::new(
                    "mode",
                    "null is not one of 'buffett', 'dalio', 'quant'",
                ));
            }
            ModeInput::Given(mode) => Some(AnalysisMode::from_str(&mode)?),
        };
        AnalysisRequest::new(query, mode)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalProbability {
    pub bullish: f64,
    pub neutral: f64,
    pub bearish: f64,
}

impl DirectionalProbability {
    pub fn total(&self) -> f64 {
        self.bullish + self.neutral + self.bearish
    }

    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.bullish, self.neutral, self.bearish)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalAttribution {
    pub signal: String,
    pub weight: f64,
    pub rationale: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub probability: f64,
    pub implication: String,
}

/// Full commentary payload returned by `/analyze`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub instrument: String,
    pub mode: AnalysisMode,
    pub directional_probability: DirectionalProbability,
    pub confidence_score: f64,
    pub key_risk_factors: Vec<String>,
    pub signal_attribution: Vec<SignalAttribution>,
    pub conflicting_indicators: Vec<String>,
    pub scenarios: Vec<Scenario>,
    pub strategy_suggestions: Vec<String>,
}

impl AnalysisResponse {
    /// Check every bounded numeric field lies in [0, 1].
    ///
    /// Sums are not checked here; they hold by construction of the engine's
    /// constants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let p = &self.directional_probability;
        check_unit("directional_probability.bullish", p.bullish)?;
        check_unit("directional_probability.neutral", p.neutral)?;
        check_unit("directional_probability.bearish", p.bearish)?;
        check_unit("confidence_score", self.confidence_score)?;

        for (i, attribution) in self.signal_attribution.iter().enumerate() {
            check_unit(&format!("signal_attribution[{}].weight", i), attribution.weight)?;
        }
        for (i, scenario) in self.scenarios.iter().enumerate() {
            check_unit(&format!("scenarios[{}].probability", i), scenario.probability)?;
        }
        Ok(())
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), ValidationError> {
    // NaN fails both comparisons
    if (MIN_UNIT..=MAX_UNIT).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("{} is outside [{}, {}]", value, MIN_UNIT, MAX_UNIT),
        ))
    }
}
