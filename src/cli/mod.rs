//! CLI interface for equity-valuator
//!
//! Provides subcommands for:
//! - `option`: Black-Scholes price and Greeks for one contract
//! - `dcf`: Monte Carlo DCF from explicit inputs
//! - `ticker`: Monte Carlo DCF from fetched market data
//! - `config`: Show effective configuration

mod dcf;
mod option;
mod report;
mod ticker;

pub use dcf::{DcfArgs, SimulationArgs};
pub use option::OptionArgs;
pub use report::{DcfReport, OptionReport, OutputFormat};
pub use ticker::TickerArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "equity-valuator")]
#[command(about = "Monte Carlo DCF valuation and Black-Scholes option pricing")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a European option and its Greeks
    Option(OptionArgs),
    /// Run a Monte Carlo DCF from explicit inputs
    Dcf(DcfArgs),
    /// Fetch market data for a ticker and run a Monte Carlo DCF
    Ticker(TickerArgs),
    /// Show effective configuration
    Config,
}
