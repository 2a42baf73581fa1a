//! Integration tests for simulation and valuation

use equity_valuator::dcf::{
    project_scenarios, DcfSimulator, NormalParams, ScenarioDraws, SimulationParams,
};
use equity_valuator::valuation::{BalanceSheet, ValuationAssembler, ValuationError};

fn params(seed: u64) -> SimulationParams {
    SimulationParams {
        last_fcf: 99.584e9,
        simulations: 5_000,
        wacc: NormalParams::new(0.09, 0.015),
        terminal_growth: NormalParams::new(0.025, 0.005),
        growth: NormalParams::new(0.06, 0.06),
        seed: Some(seed),
    }
}

#[test]
fn test_end_to_end_fair_value() {
    let batch = DcfSimulator::new().simulate(&params(42)).unwrap();
    let result = ValuationAssembler::new()
        .assemble(&batch, &BalanceSheet::new(61.5e9, 111.1e9), 15.5e9, Some(190.0))
        .unwrap();

    let summary = result.summary().unwrap();
    assert!(summary.p10 <= summary.median && summary.median <= summary.p90);
    assert!(summary.mean > 0.0);
    assert!(summary.upside.is_some());
    assert_eq!(result.fair_value().len(), 5_000);
}

#[test]
fn test_assemble_is_idempotent() {
    let batch = DcfSimulator::new().simulate(&params(7)).unwrap();
    let assembler = ValuationAssembler::new();
    let sheet = BalanceSheet::new(10e9, 5e9);
    let a = assembler.assemble(&batch, &sheet, 1e9, Some(50.0)).unwrap();
    let b = assembler.assemble(&batch, &sheet, 1e9, Some(50.0)).unwrap();
    assert_eq!(a.summary(), b.summary());
    assert_eq!(a.representative_index(), b.representative_index());
}

#[test]
fn test_zero_shares_produces_no_result() {
    let batch = DcfSimulator::new().simulate(&params(1)).unwrap();
    let err = ValuationAssembler::new()
        .assemble(&batch, &BalanceSheet::default(), 0.0, None)
        .unwrap_err();
    assert_eq!(err, ValuationError::InvalidShares(0.0));
}

#[test]
fn test_inverted_rates_still_summarize_defined_subset() {
    let mut p = params(11);
    p.simulations = 20_000;
    p.wacc = NormalParams::new(0.03, 0.02);
    p.terminal_growth = NormalParams::new(0.08, 0.02);
    let batch = DcfSimulator::new().simulate(&p).unwrap();
    let undefined = batch.undefined();
    assert!(undefined.fraction() > 0.9);
    assert!(undefined.count < undefined.total);

    let result = ValuationAssembler::new()
        .assemble(&batch, &BalanceSheet::default(), 1e9, Some(100.0))
        .unwrap();
    assert_eq!(result.undefined(), undefined);
    let summary = result.summary().unwrap();
    assert!(summary.mean.is_finite());
    assert_eq!(
        result.defined_fair_values().count(),
        undefined.total - undefined.count
    );
}

#[test]
fn test_summary_invariant_under_permutation() {
    let batch = DcfSimulator::new().simulate(&params(3)).unwrap();
    let draws = batch.draws();
    let n = draws.len();

    // Reverse, then rotate, so every scenario moves
    let order: Vec<usize> = (0..n).rev().cycle().skip(n / 3).take(n).collect();
    let permuted = ScenarioDraws::from_parts(
        order.iter().map(|&i| draws.wacc()[i]).collect(),
        order.iter().map(|&i| draws.terminal_growth()[i]).collect(),
        order.iter().map(|&i| draws.growth()[i]).collect(),
    )
    .unwrap();
    let permuted_batch = project_scenarios(batch.last_fcf(), permuted);

    for (k, &i) in order.iter().enumerate() {
        assert_eq!(
            permuted_batch.enterprise_value()[k].to_bits(),
            batch.enterprise_value()[i].to_bits()
        );
    }

    let assembler = ValuationAssembler::new();
    let sheet = BalanceSheet::new(1e9, 2e9);
    let a = assembler.assemble(&batch, &sheet, 1e9, Some(150.0)).unwrap();
    let b = assembler
        .assemble(&permuted_batch, &sheet, 1e9, Some(150.0))
        .unwrap();
    let (sa, sb) = (a.summary().unwrap(), b.summary().unwrap());
    assert_eq!(sa.mean.to_bits(), sb.mean.to_bits());
    assert_eq!(sa.median.to_bits(), sb.median.to_bits());
    assert_eq!(sa.p10.to_bits(), sb.p10.to_bits());
    assert_eq!(sa.p90.to_bits(), sb.p90.to_bits());
    assert_eq!(
        sa.upside.map(f64::to_bits),
        sb.upside.map(f64::to_bits)
    );
}

#[test]
fn test_representative_scenario_closest_to_mean() {
    let batch = DcfSimulator::new().simulate(&params(5)).unwrap();
    let result = ValuationAssembler::new()
        .assemble(&batch, &BalanceSheet::default(), 1e9, None)
        .unwrap();
    let mean = result.summary().unwrap().mean;
    let idx = result.representative_index().unwrap();
    let best = (result.fair_value()[idx] - mean).abs();
    assert!(result
        .fair_value()
        .iter()
        .all(|v| (v - mean).abs() >= best));
    assert!(batch.scenario(idx).is_some());
}
