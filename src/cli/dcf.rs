//! DCF command implementation

use super::{DcfReport, OutputFormat};
use crate::config::SimulationConfig;
use crate::dcf::{DcfSimulator, NormalParams, SimulationParams};
use crate::valuation::{BalanceSheet, ValuationAssembler};
use clap::Args;

/// Simulation overrides shared by `dcf` and `ticker`; unset values come
/// from the `[simulation]` config section
#[derive(Args, Debug, Clone, Default)]
pub struct SimulationArgs {
    /// Number of Monte Carlo scenarios
    #[arg(long)]
    pub simulations: Option<usize>,

    /// Random seed; 0 means unseeded
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub wacc_mean: Option<f64>,

    #[arg(long)]
    pub wacc_std: Option<f64>,

    #[arg(long)]
    pub tg_mean: Option<f64>,

    #[arg(long)]
    pub tg_std: Option<f64>,

    /// Yearly FCF growth standard deviation
    #[arg(long)]
    pub growth_std: Option<f64>,

    /// Number of histogram buckets in the report
    #[arg(long, default_value = "20")]
    pub bins: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl SimulationArgs {
    /// Merge overrides with configured defaults
    pub fn params(
        &self,
        defaults: &SimulationConfig,
        last_fcf: f64,
        growth_mean: f64,
    ) -> SimulationParams {
        let seed = match self.seed {
            Some(0) => None,
            Some(seed) => Some(seed),
            None => defaults.seed,
        };
        SimulationParams {
            last_fcf,
            simulations: self.simulations.unwrap_or(defaults.simulations),
            wacc: NormalParams::new(
                self.wacc_mean.unwrap_or(defaults.wacc.mean),
                self.wacc_std.unwrap_or(defaults.wacc.std_dev),
            ),
            terminal_growth: NormalParams::new(
                self.tg_mean.unwrap_or(defaults.terminal_growth.mean),
                self.tg_std.unwrap_or(defaults.terminal_growth.std_dev),
            ),
            growth: NormalParams::new(growth_mean, self.growth_std.unwrap_or(defaults.growth_std)),
            seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct DcfArgs {
    /// Most recent free cash flow, in currency units
    #[arg(long)]
    pub last_fcf: f64,

    /// Mean yearly FCF growth
    #[arg(long, default_value = "0.05")]
    pub growth_mean: f64,

    /// Cash and short-term investments
    #[arg(long, default_value = "0")]
    pub cash: f64,

    /// Total debt
    #[arg(long, default_value = "0")]
    pub debt: f64,

    /// Shares outstanding
    #[arg(long)]
    pub shares: f64,

    /// Current share price, for upside
    #[arg(long)]
    pub price: Option<f64>,

    #[command(flatten)]
    pub simulation: SimulationArgs,
}

impl DcfArgs {
    pub fn execute(&self, defaults: &SimulationConfig) -> anyhow::Result<()> {
        let params = self.simulation.params(defaults, self.last_fcf, self.growth_mean);
        warn_if_inverted(&params);

        let batch = DcfSimulator::new().simulate(&params)?;
        let result = ValuationAssembler::new().assemble(
            &batch,
            &BalanceSheet::new(self.cash, self.debt),
            self.shares,
            self.price,
        )?;

        let report = DcfReport::new(None, &params, &batch, &result, self.simulation.bins);
        println!("{}", report.render(self.simulation.format)?);
        Ok(())
    }
}

/// Warn when the mean terminal growth is not below the mean WACC
pub(crate) fn warn_if_inverted(params: &SimulationParams) {
    if params.terminal_growth.mean >= params.wacc.mean {
        tracing::warn!(
            wacc_mean = params.wacc.mean,
            tg_mean = params.terminal_growth.mean,
            "Terminal growth should be below WACC for a finite terminal value"
        );
    }
}
