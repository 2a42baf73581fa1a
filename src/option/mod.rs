//! European option pricing module
//!
//! Black-Scholes price and Greeks for a single contract

mod black_scholes;
pub mod normal;
mod types;

pub use black_scholes::{OptionContract, DAYS_PER_YEAR};
pub use types::{Greeks, OptionQuote, OptionSide, PricingError};
