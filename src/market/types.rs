//! Market data types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Market data errors
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Transport failure after retries
    #[error("HTTP error: {0}")]
    Http(String),
    /// Non-success status from the provider
    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
    /// Provider has no record for the ticker
    #[error("No data for {0}")]
    NotFound(String),
    /// A required field is absent or not usable
    #[error("Missing field {field} for {ticker}")]
    MissingField { ticker: String, field: &'static str },
    /// Too few FCF observations to derive a growth rate
    #[error("Insufficient FCF history: need {required}, found {found}")]
    InsufficientHistory { required: usize, found: usize },
}

impl From<reqwest::Error> for MarketDataError {
    fn from(e: reqwest::Error) -> Self {
        MarketDataError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for MarketDataError {
    fn from(e: serde_json::Error) -> Self {
        MarketDataError::Decode(e.to_string())
    }
}

/// One annual free cash flow figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FcfObservation {
    pub date: NaiveDate,
    pub free_cash_flow: f64,
}

/// Free cash flow history, always ordered oldest to newest
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FcfHistory {
    observations: Vec<FcfObservation>,
}

impl FcfHistory {
    pub fn new(mut observations: Vec<FcfObservation>) -> Self {
        observations.sort_by_key(|o| o.date);
        Self { observations }
    }

    pub fn observations(&self) -> &[FcfObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&FcfObservation> {
        self.observations.first()
    }

    /// Most recent observation
    pub fn latest(&self) -> Option<&FcfObservation> {
        self.observations.last()
    }
}

/// Latest quote for a ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub shares_outstanding: f64,
}

/// Most recent balance sheet period
///
/// Fields are optional because providers omit them for some issuers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetSnapshot {
    pub date: NaiveDate,
    pub cash_and_short_term_investments: Option<f64>,
    pub total_debt: Option<f64>,
}
