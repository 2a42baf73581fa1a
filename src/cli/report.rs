//! Report rendering for CLI output
//!
//! Unit conversions that are display concerns (theta per day, vega per vol
//! point) happen here, never in the pricing core.

use crate::dcf::{ScenarioView, SimulationBatch, SimulationParams, UndefinedScenarios};
use crate::option::{OptionContract, OptionQuote, DAYS_PER_YEAR};
use crate::valuation::{FairValueSummary, HistogramBin, ValuationResult};
use clap::ValueEnum;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Option pricing output
#[derive(Debug, Clone, Serialize)]
pub struct OptionReport {
    pub d1: f64,
    pub d2: f64,
    pub time_to_expiry: f64,
    pub quote: OptionQuote,
}

impl OptionReport {
    pub fn new(contract: &OptionContract) -> Self {
        Self {
            d1: contract.d1(),
            d2: contract.d2(),
            time_to_expiry: contract.time_to_expiry(),
            quote: contract.quote(),
        }
    }

    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Table => Ok(self.format_table()),
        }
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let (c, p) = (&self.quote.call, &self.quote.put);
        format!(
            r#"
══════════════════════════════════════════════════════
               BLACK-SCHOLES
══════════════════════════════════════════════════════
T = {:.4}y   d1 = {:.4}   d2 = {:.4}

                      Call            Put
───────────────────────────────────────────────────────
Price           {:>12.4}   {:>12.4}
Delta           {:>12.4}   {:>12.4}
Gamma           {:>12.4}   {:>12.4}
Vega (1.00)     {:>12.4}   {:>12.4}
Vega (1 pt)     {:>12.4}   {:>12.4}
Theta (year)    {:>12.4}   {:>12.4}
Theta (day)     {:>12.4}   {:>12.4}
Rho (1%)        {:>12.4}   {:>12.4}
══════════════════════════════════════════════════════
"#,
            self.time_to_expiry,
            self.d1,
            self.d2,
            c.price,
            p.price,
            c.delta,
            p.delta,
            c.gamma,
            p.gamma,
            c.vega,
            p.vega,
            per_vol_point(c.vega),
            per_vol_point(p.vega),
            c.theta,
            p.theta,
            per_day(c.theta),
            per_day(p.theta),
            c.rho,
            p.rho,
        )
    }
}

/// Theta per calendar day from a per-year figure
pub fn per_day(theta_per_year: f64) -> f64 {
    theta_per_year / DAYS_PER_YEAR
}

/// Vega per one volatility point from a per-unit figure
pub fn per_vol_point(vega_per_unit: f64) -> f64 {
    vega_per_unit / 100.0
}

/// Monte Carlo DCF output
#[derive(Debug, Clone, Serialize)]
pub struct DcfReport {
    pub ticker: Option<String>,
    pub params: SimulationParams,
    pub undefined: UndefinedScenarios,
    pub summary: Option<FairValueSummary>,
    pub current_price: Option<f64>,
    pub representative: Option<ScenarioView>,
    pub histogram: Vec<HistogramBin>,
}

impl DcfReport {
    pub fn new(
        ticker: Option<String>,
        params: &SimulationParams,
        batch: &SimulationBatch,
        result: &ValuationResult,
        bins: usize,
    ) -> Self {
        Self {
            ticker,
            params: params.clone(),
            undefined: result.undefined(),
            summary: result.summary().copied(),
            current_price: result.current_price(),
            representative: result
                .representative_index()
                .and_then(|i| batch.scenario(i)),
            histogram: result.histogram(bins),
        }
    }

    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Table => Ok(self.format_table()),
        }
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let title = match &self.ticker {
            Some(t) => format!("MONTE CARLO DCF: {t}"),
            None => "MONTE CARLO DCF".to_string(),
        };
        let rule = "═".repeat(54);
        let thin = "─".repeat(55);

        let mut out = format!(
            "\n{rule}\n{title:^54}\n{rule}\nScenarios:        {} ({} undefined, {:.2}%)\n",
            self.undefined.total,
            self.undefined.count,
            self.undefined.fraction() * 100.0
        );
        out.push_str(&self.summary_section(&thin));
        if let Some(rep) = &self.representative {
            out.push_str(&representative_section(rep, &thin));
        }
        if !self.histogram.is_empty() {
            out.push_str(&self.histogram_section(&thin));
        }
        out.push_str(&rule);
        out.push('\n');
        out
    }

    fn summary_section(&self, thin: &str) -> String {
        let Some(s) = &self.summary else {
            return "\nNo defined scenarios: WACC never exceeded terminal growth\n".to_string();
        };
        let upside = match (s.upside, self.current_price) {
            (Some(upside), Some(price)) => {
                format!("Upside vs price:  {:+.2}% (ref {price:.2})\n", upside * 100.0)
            }
            _ => String::new(),
        };
        format!(
            r#"
FAIR VALUE PER SHARE
{thin}
Mean:             {:.2}
Median:           {:.2}
P10 - P90:        {:.2} - {:.2}
{upside}"#,
            s.mean, s.median, s.p10, s.p90,
        )
    }

    fn histogram_section(&self, thin: &str) -> String {
        let peak = self.histogram.iter().map(|b| b.count).max().unwrap_or(1).max(1);
        let bars: String = self
            .histogram
            .iter()
            .map(|bin| {
                let bar = "█".repeat(bin.count * 30 / peak);
                format!("{:>12.2} {:<30} {}\n", bin.lower, bar, bin.count)
            })
            .collect();
        format!("\nDISTRIBUTION\n{thin}\n{bars}")
    }
}

fn representative_section(rep: &ScenarioView, thin: &str) -> String {
    let years: String = (0..rep.fcf.len())
        .map(|year| {
            format!(
                "Year {}  {:>8.2}%  {:>18.2}  {:>18.2}\n",
                year + 1,
                rep.growth[year] * 100.0,
                rep.fcf[year],
                rep.discounted_fcf[year]
            )
        })
        .collect();
    format!(
        r#"
REPRESENTATIVE SCENARIO #{} (WACC {:.2}%, TG {:.2}%)
{thin}
Year      Growth        Projected FCF     Discounted FCF
{years}Discounted terminal value: {:.2}
Enterprise value:          {:.2}
"#,
        rep.index,
        rep.wacc * 100.0,
        rep.terminal_growth * 100.0,
        rep.discounted_terminal_value,
        rep.enterprise_value,
    )
}
