//! Per-share valuation module
//!
//! Converts a batch of simulated enterprise values into equity value and
//! fair value per share, then summarizes the defined scenarios.

pub mod stats;
mod types;

pub use types::{BalanceSheet, FairValueSummary, HistogramBin, ValuationError};

use crate::dcf::{SimulationBatch, UndefinedScenarios};
use serde::Serialize;

/// Fair value distribution for one simulation batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    balance_sheet: BalanceSheet,
    shares_outstanding: f64,
    current_price: Option<f64>,
    enterprise_value: Vec<f64>,
    equity_value: Vec<f64>,
    fair_value: Vec<f64>,
    undefined: UndefinedScenarios,
    summary: Option<FairValueSummary>,
    representative: Option<usize>,
}

impl ValuationResult {
    pub fn balance_sheet(&self) -> BalanceSheet {
        self.balance_sheet
    }

    pub fn shares_outstanding(&self) -> f64 {
        self.shares_outstanding
    }

    pub fn current_price(&self) -> Option<f64> {
        self.current_price
    }

    pub fn enterprise_value(&self) -> &[f64] {
        &self.enterprise_value
    }

    /// Enterprise value + cash - debt per scenario
    pub fn equity_value(&self) -> &[f64] {
        &self.equity_value
    }

    /// Equity value per share per scenario, NaN where undefined
    pub fn fair_value(&self) -> &[f64] {
        &self.fair_value
    }

    /// Fair values of the defined scenarios, in scenario order
    pub fn defined_fair_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.fair_value.iter().copied().filter(|v| v.is_finite())
    }

    pub fn undefined(&self) -> UndefinedScenarios {
        self.undefined
    }

    /// Summary statistics, `None` when no scenario is defined
    pub fn summary(&self) -> Option<&FairValueSummary> {
        self.summary.as_ref()
    }

    /// Index of the scenario whose fair value is closest to the mean
    pub fn representative_index(&self) -> Option<usize> {
        self.representative
    }

    /// Equal-width histogram of the defined fair values
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        let values: Vec<f64> = self.defined_fair_values().collect();
        if bins == 0 || values.is_empty() {
            return Vec::new();
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width = (max - min) / bins as f64;

        let mut counts = vec![0usize; bins];
        for v in &values {
            let slot = if width > 0.0 {
                (((v - min) / width) as usize).min(bins - 1)
            } else {
                0
            };
            counts[slot] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: min + width * i as f64,
                upper: min + width * (i + 1) as f64,
                count,
            })
            .collect()
    }
}

/// Builds [`ValuationResult`]s from simulation batches
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationAssembler;

impl ValuationAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Combine a batch with balance sheet data and share count
    ///
    /// Undefined enterprise values stay undefined through equity and fair
    /// value and are excluded from the summary. The upside is reported only
    /// for a finite, non-zero `current_price`.
    pub fn assemble(
        &self,
        batch: &SimulationBatch,
        balance_sheet: &BalanceSheet,
        shares_outstanding: f64,
        current_price: Option<f64>,
    ) -> Result<ValuationResult, ValuationError> {
        if !(shares_outstanding.is_finite() && shares_outstanding > 0.0) {
            return Err(ValuationError::InvalidShares(shares_outstanding));
        }

        if !(balance_sheet.cash.is_finite() && balance_sheet.debt.is_finite()) {
            tracing::warn!(
                cash = balance_sheet.cash,
                debt = balance_sheet.debt,
                "Non-finite balance sheet values treated as zero"
            );
        }
        let balance_sheet =
            BalanceSheet::from_partial(Some(balance_sheet.cash), Some(balance_sheet.debt));
        let net_cash = balance_sheet.net_cash();

        let enterprise_value = batch.enterprise_value().to_vec();
        let equity_value: Vec<f64> = enterprise_value.iter().map(|ev| ev + net_cash).collect();
        let fair_value: Vec<f64> = equity_value
            .iter()
            .map(|eq| eq / shares_outstanding)
            .collect();

        let defined: Vec<f64> = fair_value.iter().copied().filter(|v| v.is_finite()).collect();
        let undefined = UndefinedScenarios {
            count: fair_value.len() - defined.len(),
            total: fair_value.len(),
        };

        let current_price = current_price.filter(|p| p.is_finite());
        let summary = summarize(&defined, current_price);
        let representative = summary
            .as_ref()
            .and_then(|s| stats::closest_index(&fair_value, s.mean));

        if summary.is_none() {
            tracing::warn!(total = undefined.total, "No defined scenarios to summarize");
        }
        tracing::debug!(
            defined = defined.len(),
            undefined = undefined.count,
            mean = summary.map(|s| s.mean),
            "Valuation assembled"
        );

        Ok(ValuationResult {
            balance_sheet,
            shares_outstanding,
            current_price,
            enterprise_value,
            equity_value,
            fair_value,
            undefined,
            summary,
            representative,
        })
    }
}

fn summarize(defined: &[f64], current_price: Option<f64>) -> Option<FairValueSummary> {
    // summing in sorted order keeps the mean independent of scenario order
    let sorted = stats::sorted(defined);
    let mean = stats::mean(&sorted)?;
    let upside = current_price
        .filter(|&p| p != 0.0)
        .map(|p| (mean - p) / p);

    Some(FairValueSummary {
        mean,
        median: stats::percentile_sorted(&sorted, 50.0)?,
        p10: stats::percentile_sorted(&sorted, 10.0)?,
        p90: stats::percentile_sorted(&sorted, 90.0)?,
        upside,
    })
}
