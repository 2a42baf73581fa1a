//! Monte Carlo DCF module
//!
//! Samples WACC, terminal growth and yearly FCF growth, projects five years
//! of free cash flow per scenario, and discounts each trajectory plus its
//! Gordon terminal value into an enterprise value.

mod batch;
mod projection;
mod sampler;
mod types;

pub use batch::{ScenarioView, SimulationBatch};
pub use projection::{gordon_terminal_value, project_scenarios};
pub use sampler::{
    ScenarioDraws, ScenarioSampler, GROWTH_BOUNDS, TERMINAL_GROWTH_BOUNDS, WACC_BOUNDS,
};
pub use types::{NormalParams, SimulationError, UndefinedScenarios};

use crate::telemetry;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Explicit forecast horizon in years
pub const FORECAST_YEARS: usize = 5;

/// Inputs for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Most recent observed free cash flow, in currency units
    pub last_fcf: f64,
    /// Number of scenarios
    pub simulations: usize,
    pub wacc: NormalParams,
    pub terminal_growth: NormalParams,
    /// Yearly FCF growth, drawn independently per year
    pub growth: NormalParams,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl SimulationParams {
    fn validate(&self) -> Result<(), SimulationError> {
        if self.simulations == 0 {
            return Err(SimulationError::ZeroScenarios);
        }
        finite("last_fcf", self.last_fcf)?;
        for (mean, std, dist) in [
            ("wacc_mean", "wacc_std", self.wacc),
            ("terminal_growth_mean", "terminal_growth_std", self.terminal_growth),
            ("growth_mean", "growth_std", self.growth),
        ] {
            finite(mean, dist.mean)?;
            finite(std, dist.std_dev)?;
            if dist.std_dev < 0.0 {
                return Err(SimulationError::InvalidParameter {
                    name: std,
                    value: dist.std_dev,
                });
            }
        }
        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value })
    }
}

/// Stateless Monte Carlo DCF engine
#[derive(Debug, Clone, Copy, Default)]
pub struct DcfSimulator;

impl DcfSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Run a full batch
    ///
    /// Either returns every scenario or fails before sampling; no partial
    /// batch is ever produced.
    pub fn simulate(&self, params: &SimulationParams) -> Result<SimulationBatch, SimulationError> {
        params.validate()?;

        let span = tracing::info_span!(
            "dcf_simulation",
            run_id = %uuid::Uuid::new_v4(),
            simulations = params.simulations,
            seeded = params.seed.is_some(),
        );
        let _enter = span.enter();
        let started = Instant::now();

        let draws = ScenarioSampler::new(params.seed).sample(
            params.simulations,
            params.wacc,
            params.terminal_growth,
            params.growth,
        )?;
        let batch = project_scenarios(params.last_fcf, draws);

        let undefined = batch.undefined();
        if !undefined.is_empty() {
            tracing::warn!(
                undefined = undefined.count,
                total = undefined.total,
                fraction = undefined.fraction(),
                "Scenarios with WACC <= terminal growth have no terminal value"
            );
        }

        let elapsed = started.elapsed();
        telemetry::record_simulation(batch.len(), undefined.count, elapsed);
        tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "Simulation complete");

        Ok(batch)
    }
}
