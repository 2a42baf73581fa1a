//! Option command implementation

use super::{OptionReport, OutputFormat};
use crate::option::OptionContract;
use clap::Args;

#[derive(Args, Debug)]
pub struct OptionArgs {
    /// Spot price of the underlying
    #[arg(long, default_value = "100")]
    pub spot: f64,

    /// Strike price
    #[arg(long, default_value = "100")]
    pub strike: f64,

    /// Risk-free rate as a decimal
    #[arg(long, default_value = "0.05")]
    pub rate: f64,

    /// Calendar days to expiry
    #[arg(long, default_value = "30")]
    pub days: f64,

    /// Annualized volatility as a decimal
    #[arg(long, default_value = "0.2")]
    pub vol: f64,

    /// Units of underlying per contract
    #[arg(long, default_value = "100")]
    pub multiplier: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl OptionArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let contract = OptionContract::new(
            self.spot,
            self.strike,
            self.rate,
            self.days,
            self.vol,
            self.multiplier,
        )?;
        let report = OptionReport::new(&contract);
        println!("{}", report.render(self.format)?);
        Ok(())
    }
}
