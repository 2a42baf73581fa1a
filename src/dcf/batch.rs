//! Simulation batch results

use super::{ScenarioDraws, UndefinedScenarios, FORECAST_YEARS};
use serde::Serialize;

/// All per-scenario arrays produced by one simulation run
///
/// Built once by the simulator and never mutated. Scenarios with an
/// undefined terminal value stay in place with NaN terminal and enterprise
/// values so that `len()` always equals the requested simulation count.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationBatch {
    pub(crate) last_fcf: f64,
    pub(crate) draws: ScenarioDraws,
    pub(crate) fcf: Vec<[f64; FORECAST_YEARS]>,
    pub(crate) discounted_fcf: Vec<[f64; FORECAST_YEARS]>,
    pub(crate) discounted_terminal_value: Vec<f64>,
    pub(crate) enterprise_value: Vec<f64>,
    pub(crate) undefined: UndefinedScenarios,
}

/// One scenario's row across every batch array
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioView {
    pub index: usize,
    pub wacc: f64,
    pub terminal_growth: f64,
    pub growth: [f64; FORECAST_YEARS],
    pub fcf: [f64; FORECAST_YEARS],
    pub discounted_fcf: [f64; FORECAST_YEARS],
    pub discounted_terminal_value: f64,
    pub enterprise_value: f64,
}

impl SimulationBatch {
    pub fn len(&self) -> usize {
        self.enterprise_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enterprise_value.is_empty()
    }

    /// The FCF the projection started from
    pub fn last_fcf(&self) -> f64 {
        self.last_fcf
    }

    pub fn wacc(&self) -> &[f64] {
        self.draws.wacc()
    }

    pub fn terminal_growth(&self) -> &[f64] {
        self.draws.terminal_growth()
    }

    pub fn growth(&self) -> &[[f64; FORECAST_YEARS]] {
        self.draws.growth()
    }

    pub fn draws(&self) -> &ScenarioDraws {
        &self.draws
    }

    /// Projected FCF per scenario and year
    pub fn fcf(&self) -> &[[f64; FORECAST_YEARS]] {
        &self.fcf
    }

    /// FCF discounted at each scenario's WACC
    pub fn discounted_fcf(&self) -> &[[f64; FORECAST_YEARS]] {
        &self.discounted_fcf
    }

    pub fn discounted_terminal_value(&self) -> &[f64] {
        &self.discounted_terminal_value
    }

    pub fn enterprise_value(&self) -> &[f64] {
        &self.enterprise_value
    }

    /// Count of scenarios with an undefined terminal value
    pub fn undefined(&self) -> UndefinedScenarios {
        self.undefined
    }

    /// Whether scenario `index` produced a finite enterprise value
    pub fn is_defined(&self, index: usize) -> bool {
        self.enterprise_value
            .get(index)
            .is_some_and(|ev| ev.is_finite())
    }

    pub fn scenario(&self, index: usize) -> Option<ScenarioView> {
        Some(ScenarioView {
            index,
            wacc: *self.draws.wacc.get(index)?,
            terminal_growth: *self.draws.terminal_growth.get(index)?,
            growth: *self.draws.growth.get(index)?,
            fcf: *self.fcf.get(index)?,
            discounted_fcf: *self.discounted_fcf.get(index)?,
            discounted_terminal_value: *self.discounted_terminal_value.get(index)?,
            enterprise_value: *self.enterprise_value.get(index)?,
        })
    }
}
