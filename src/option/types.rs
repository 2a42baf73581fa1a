//! Option pricing types

use serde::Serialize;
use thiserror::Error;

/// Option pricing errors
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A constructor precondition was violated
    #[error("Invalid input: {field} = {value}")]
    InvalidInput { field: &'static str, value: f64 },
}

/// Which side of the contract to price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    Call,
    Put,
}

/// Price and sensitivities for one side of a contract, scaled by the
/// contract multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Greeks {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    /// Per 1.00 change in volatility
    pub vega: f64,
    /// Per year
    pub theta: f64,
    /// Per 1% change in the risk-free rate
    pub rho: f64,
}

/// Both sides of a contract
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionQuote {
    pub call: Greeks,
    pub put: Greeks,
}
