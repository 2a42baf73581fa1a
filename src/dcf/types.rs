//! DCF simulation types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation errors. Raised before any scenario is generated.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// Scenario count must be at least one
    #[error("Simulation count must be at least 1")]
    ZeroScenarios,
    /// A parameter is non-finite or a standard deviation is negative
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    /// Draw arrays disagree on the number of scenarios
    #[error("Mismatched draws: {wacc} WACC, {terminal_growth} terminal growth, {growth} growth rows")]
    MismatchedDraws {
        wacc: usize,
        terminal_growth: usize,
        growth: usize,
    },
}

/// Mean and standard deviation of a normally distributed input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormalParams {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

/// Scenarios whose WACC did not exceed terminal growth
///
/// Non-fatal: the scenarios stay in the batch with an undefined (NaN)
/// terminal and enterprise value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UndefinedScenarios {
    pub count: usize,
    pub total: usize,
}

impl UndefinedScenarios {
    /// Fraction of the batch that is undefined
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count as f64 / self.total as f64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
