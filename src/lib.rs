//! Cenex AI - market commentary service
//!
//! Accepts an instrument query and an analysis mode, and answers with a
//! fixed-shape commentary payload: directional probabilities, signal
//! attribution, scenarios and strategy suggestions.

pub mod api;
pub mod config;
pub mod constants;
pub mod doctor;
pub mod engine;
pub mod error;
pub mod schemas;

// Re-export commonly used types
pub use config::AppConfig;
pub use engine::{generate_analysis, mode_bias};
pub use error::{ApiError, ValidationError};
pub use schemas::{AnalysisMode, AnalysisRequest, AnalysisResponse};

#[cfg(test)]
mod engine_tests;
