//! equity-valuator: fair value estimation for equities
//!
//! This library provides:
//! - Closed-form Black-Scholes pricing with Greeks
//! - Monte Carlo DCF simulation over WACC, terminal growth and FCF growth
//! - Per-share fair value distributions from simulated enterprise values
//! - Market data access with TTL caching for the CLI front end
//! - Logging and metrics setup

pub mod cli;
pub mod config;
pub mod dcf;
pub mod market;
pub mod option;
pub mod telemetry;
pub mod valuation;
