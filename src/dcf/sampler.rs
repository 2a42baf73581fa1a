//! Clipped normal scenario sampling

use super::{NormalParams, SimulationError, FORECAST_YEARS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::ops::RangeInclusive;

/// Allowed range of a sampled WACC
pub const WACC_BOUNDS: RangeInclusive<f64> = 0.01..=0.25;
/// Allowed range of a sampled terminal growth rate
pub const TERMINAL_GROWTH_BOUNDS: RangeInclusive<f64> = 0.0..=0.10;
/// Allowed range of a sampled yearly FCF growth rate
pub const GROWTH_BOUNDS: RangeInclusive<f64> = -0.90..=0.50;

/// Raw random inputs for a batch of scenarios
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDraws {
    pub(crate) wacc: Vec<f64>,
    pub(crate) terminal_growth: Vec<f64>,
    pub(crate) growth: Vec<[f64; FORECAST_YEARS]>,
}

impl ScenarioDraws {
    /// Build draws from explicit arrays, e.g. a reordering of another batch
    pub fn from_parts(
        wacc: Vec<f64>,
        terminal_growth: Vec<f64>,
        growth: Vec<[f64; FORECAST_YEARS]>,
    ) -> Result<Self, SimulationError> {
        if wacc.len() != terminal_growth.len() || wacc.len() != growth.len() {
            return Err(SimulationError::MismatchedDraws {
                wacc: wacc.len(),
                terminal_growth: terminal_growth.len(),
                growth: growth.len(),
            });
        }
        Ok(Self {
            wacc,
            terminal_growth,
            growth,
        })
    }

    pub fn len(&self) -> usize {
        self.wacc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wacc.is_empty()
    }

    pub fn wacc(&self) -> &[f64] {
        &self.wacc
    }

    pub fn terminal_growth(&self) -> &[f64] {
        &self.terminal_growth
    }

    pub fn growth(&self) -> &[[f64; FORECAST_YEARS]] {
        &self.growth
    }
}

/// Source of scenario draws for one run
pub struct ScenarioSampler {
    rng: StdRng,
}

impl ScenarioSampler {
    /// Seeded samplers are reproducible; unseeded ones draw fresh entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Draw `n` scenarios
    ///
    /// Order is fixed: all WACC values, then all terminal growth values,
    /// then yearly growth scenario by scenario.
    pub fn sample(
        &mut self,
        n: usize,
        wacc: NormalParams,
        terminal_growth: NormalParams,
        growth: NormalParams,
    ) -> Result<ScenarioDraws, SimulationError> {
        let wacc_dist = normal("wacc_std", wacc)?;
        let tg_dist = normal("terminal_growth_std", terminal_growth)?;
        let growth_dist = normal("growth_std", growth)?;

        let wacc = self.clipped(&wacc_dist, &WACC_BOUNDS, n);
        let terminal_growth = self.clipped(&tg_dist, &TERMINAL_GROWTH_BOUNDS, n);
        let growth = (0..n)
            .map(|_| {
                let mut row = [0.0; FORECAST_YEARS];
                for g in row.iter_mut() {
                    *g = clip(growth_dist.sample(&mut self.rng), &GROWTH_BOUNDS);
                }
                row
            })
            .collect();

        Ok(ScenarioDraws {
            wacc,
            terminal_growth,
            growth,
        })
    }

    fn clipped(&mut self, dist: &Normal<f64>, bounds: &RangeInclusive<f64>, n: usize) -> Vec<f64> {
        (0..n).map(|_| clip(dist.sample(&mut self.rng), bounds)).collect()
    }
}

/// `Normal::new` accepts a negative std_dev and mirrors the draws, so the sign is checked here
fn normal(name: &'static str, params: NormalParams) -> Result<Normal<f64>, SimulationError> {
    let invalid = || SimulationError::InvalidParameter {
        name,
        value: params.std_dev,
    };
    if !(params.std_dev.is_finite() && params.std_dev >= 0.0) {
        return Err(invalid());
    }
    Normal::new(params.mean, params.std_dev).map_err(|_| invalid())
}

#[inline]
fn clip(x: f64, bounds: &RangeInclusive<f64>) -> f64 {
    x.clamp(*bounds.start(), *bounds.end())
}
