//! Cash flow projection, terminal value and discounting
//!
//! Each scenario is an independent five-year recurrence, so the batch is
//! projected in parallel. The collect preserves scenario order and no
//! scenario reads another's state, which keeps results independent of the
//! thread count.

use super::{ScenarioDraws, SimulationBatch, UndefinedScenarios, FORECAST_YEARS};
use rayon::prelude::*;

/// Outputs of a single projected scenario
#[derive(Debug, Clone, Copy)]
struct ProjectedScenario {
    fcf: [f64; FORECAST_YEARS],
    discounted_fcf: [f64; FORECAST_YEARS],
    discounted_terminal_value: f64,
    enterprise_value: f64,
}

/// Project every scenario in `draws` from the last observed FCF
pub fn project_scenarios(last_fcf: f64, draws: ScenarioDraws) -> SimulationBatch {
    let projected: Vec<ProjectedScenario> = (0..draws.len())
        .into_par_iter()
        .map(|i| {
            project_one(
                last_fcf,
                draws.wacc[i],
                draws.terminal_growth[i],
                &draws.growth[i],
            )
        })
        .collect();

    let n = projected.len();
    let mut fcf = Vec::with_capacity(n);
    let mut discounted_fcf = Vec::with_capacity(n);
    let mut discounted_terminal_value = Vec::with_capacity(n);
    let mut enterprise_value = Vec::with_capacity(n);
    for p in projected {
        fcf.push(p.fcf);
        discounted_fcf.push(p.discounted_fcf);
        discounted_terminal_value.push(p.discounted_terminal_value);
        enterprise_value.push(p.enterprise_value);
    }

    let undefined = UndefinedScenarios {
        count: enterprise_value.iter().filter(|ev| !ev.is_finite()).count(),
        total: n,
    };

    SimulationBatch {
        last_fcf,
        draws,
        fcf,
        discounted_fcf,
        discounted_terminal_value,
        enterprise_value,
        undefined,
    }
}

fn project_one(
    last_fcf: f64,
    wacc: f64,
    terminal_growth: f64,
    growth: &[f64; FORECAST_YEARS],
) -> ProjectedScenario {
    let mut fcf = [0.0; FORECAST_YEARS];
    let mut discounted_fcf = [0.0; FORECAST_YEARS];

    let mut previous = last_fcf;
    let mut discount = 1.0;
    for year in 0..FORECAST_YEARS {
        previous *= 1.0 + growth[year];
        discount *= 1.0 + wacc;
        fcf[year] = previous;
        discounted_fcf[year] = previous / discount;
    }

    let terminal_value = gordon_terminal_value(fcf[FORECAST_YEARS - 1], wacc, terminal_growth);
    let discounted_terminal_value = terminal_value / (1.0 + wacc).powi(FORECAST_YEARS as i32);

    // Undefined yearly terms are skipped; an undefined terminal value is not
    let pv_fcf: f64 = discounted_fcf.iter().filter(|v| !v.is_nan()).sum();

    ProjectedScenario {
        fcf,
        discounted_fcf,
        discounted_terminal_value,
        enterprise_value: pv_fcf + discounted_terminal_value,
    }
}

/// Gordon growth terminal value, NaN unless `wacc > terminal_growth`
pub fn gordon_terminal_value(final_fcf: f64, wacc: f64, terminal_growth: f64) -> f64 {
    if wacc > terminal_growth {
        final_fcf * (1.0 + terminal_growth) / (wacc - terminal_growth)
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_draws(n: usize, wacc: f64, tg: f64, g: f64) -> ScenarioDraws {
        ScenarioDraws::from_parts(vec![wacc; n], vec![tg; n], vec![[g; FORECAST_YEARS]; n])
            .unwrap()
    }

    #[test]
    fn test_recurrence_and_discounting() {
        let batch = project_scenarios(100.0, flat_draws(1, 0.10, 0.02, 0.05));
        let fcf = batch.fcf()[0];
        let expected_fcf = [105.0, 110.25, 115.7625, 121.550_625, 127.628_156_25];
        for (a, e) in fcf.iter().zip(expected_fcf) {
            assert!((a - e).abs() < 1e-9);
        }
        for (t, d) in batch.discounted_fcf()[0].iter().enumerate() {
            let expected = expected_fcf[t] / 1.1_f64.powi(t as i32 + 1);
            assert!((d - expected).abs() < 1e-9);
        }

        let tv = 127.628_156_25 * 1.02 / 0.08;
        let dtv = tv / 1.1_f64.powi(5);
        assert!((batch.discounted_terminal_value()[0] - dtv).abs() < 1e-9);

        let pv: f64 = batch.discounted_fcf()[0].iter().sum();
        assert!((batch.enterprise_value()[0] - (pv + dtv)).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_value_undefined_when_wacc_not_above_growth() {
        assert!(gordon_terminal_value(100.0, 0.05, 0.05).is_nan());
        assert!(gordon_terminal_value(100.0, 0.03, 0.08).is_nan());
        assert!(gordon_terminal_value(100.0, 0.08, 0.03).is_finite());
    }

    #[test]
    fn test_undefined_scenario_isolated() {
        let draws = ScenarioDraws::from_parts(
            vec![0.10, 0.03, 0.10],
            vec![0.02, 0.05, 0.02],
            vec![[0.05; FORECAST_YEARS]; 3],
        )
        .unwrap();
        let batch = project_scenarios(100.0, draws);
        assert!(batch.enterprise_value()[0].is_finite());
        assert!(batch.enterprise_value()[1].is_nan());
        assert!(batch.discounted_terminal_value()[1].is_nan());
        assert!(batch.enterprise_value()[2].is_finite());
        assert!(batch.discounted_fcf()[1].iter().all(|v| v.is_finite()));
        assert_eq!(batch.undefined().count, 1);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_negative_base_fcf_projects_negative() {
        let batch = project_scenarios(-50.0, flat_draws(2, 0.09, 0.02, 0.1));
        assert!(batch.fcf().iter().flatten().all(|&f| f < 0.0));
        assert!(batch.enterprise_value().iter().all(|&ev| ev < 0.0));
    }
}
