//! Ticker command implementation
//!
//! Fetches FCF history, quote and balance sheet, derives the growth mean
//! from historical CAGR, then runs the same pipeline as `dcf`.

use super::dcf::warn_if_inverted;
use super::{DcfReport, SimulationArgs};
use crate::config::Config;
use crate::dcf::DcfSimulator;
use crate::market::{growth, CachedProvider, FmpClient, MarketDataError, MarketDataProvider};
use crate::valuation::{BalanceSheet, ValuationAssembler};
use clap::Args;

#[derive(Args, Debug)]
pub struct TickerArgs {
    /// Ticker symbol, e.g. AAPL
    pub symbol: String,

    /// Mean yearly FCF growth; defaults to historical CAGR
    #[arg(long)]
    pub growth_mean: Option<f64>,

    #[command(flatten)]
    pub simulation: SimulationArgs,
}

impl TickerArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = FmpClient::new(&config.provider, config.provider.api_key())?;
        let provider = CachedProvider::new(client, &config.cache);
        let report = self.run(&provider, config).await?;
        println!("{}", report.render(self.simulation.format)?);
        Ok(())
    }

    /// Fetch inputs from `provider` and build the report
    pub async fn run<P: MarketDataProvider>(
        &self,
        provider: &P,
        config: &Config,
    ) -> anyhow::Result<DcfReport> {
        let symbol = self.symbol.trim().to_uppercase();
        tracing::info!(symbol = %symbol, "Fetching market data");

        let (history, quote, sheet) = tokio::join!(
            provider.fcf_history(&symbol, config.provider.history_limit),
            provider.quote(&symbol),
            provider.balance_sheet(&symbol),
        );
        let history = history?;
        let quote = quote?;

        let cagr = growth::historical_cagr(&history)?;
        let last_fcf = history
            .latest()
            .map(|o| o.free_cash_flow)
            .ok_or(MarketDataError::InsufficientHistory {
                required: growth::MIN_HISTORY,
                found: 0,
            })?;

        // A missing balance sheet is tolerated as zero cash and debt
        let balance_sheet = match sheet {
            Ok(s) => BalanceSheet::from_partial(s.cash_and_short_term_investments, s.total_debt),
            Err(e) => {
                tracing::warn!(
                    symbol = %symbol,
                    error = %e,
                    "Balance sheet unavailable, assuming zero cash and debt"
                );
                BalanceSheet::default()
            }
        };

        let growth_mean = self.growth_mean.unwrap_or(cagr);
        let params = self.simulation.params(&config.simulation, last_fcf, growth_mean);
        tracing::info!(
            symbol = %symbol,
            observations = history.len(),
            cagr,
            last_fcf,
            price = quote.price,
            "Inputs ready"
        );
        warn_if_inverted(&params);

        let batch = DcfSimulator::new().simulate(&params)?;
        let result = ValuationAssembler::new().assemble(
            &batch,
            &balance_sheet,
            quote.shares_outstanding,
            Some(quote.price),
        )?;

        Ok(DcfReport::new(
            Some(symbol),
            &params,
            &batch,
            &result,
            self.simulation.bins,
        ))
    }
}
