//! Valuation types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Valuation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValuationError {
    /// Share count must be positive and finite
    #[error("Invalid shares outstanding: {0}")]
    InvalidShares(f64),
}

/// Balance sheet adjustments applied to every scenario
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Cash and short-term investments
    pub cash: f64,
    /// Total debt
    pub debt: f64,
}

impl BalanceSheet {
    pub fn new(cash: f64, debt: f64) -> Self {
        Self { cash, debt }
    }

    /// Build from possibly missing data, treating gaps as zero
    pub fn from_partial(cash: Option<f64>, debt: Option<f64>) -> Self {
        Self {
            cash: cash.filter(|c| c.is_finite()).unwrap_or(0.0),
            debt: debt.filter(|d| d.is_finite()).unwrap_or(0.0),
        }
    }

    /// Cash minus debt
    pub fn net_cash(&self) -> f64 {
        self.cash - self.debt
    }
}

/// Distribution summary over the defined fair values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairValueSummary {
    pub mean: f64,
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
    /// (mean - price) / price, when a usable price was supplied
    pub upside: Option<f64>,
}

/// One equal-width histogram bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}
