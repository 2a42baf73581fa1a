//! Integration tests for the option pricer

use equity_valuator::option::{OptionContract, OptionSide, PricingError};

#[test]
fn test_reference_contract() {
    let contract = OptionContract::new(100.0, 100.0, 0.05, 30.0, 0.20, 100).unwrap();
    let call = contract.greeks(OptionSide::Call);
    assert!((call.price - 249.337_681_94).abs() < 1e-6);
    assert!((call.price / 100.0 - 2.493_376_82).abs() < 1e-8);
}

#[test]
fn test_parity_across_grid() {
    for spot in [60.0, 95.0, 100.0, 140.0] {
        for days in [1.0, 30.0, 180.0, 730.0] {
            for rate in [0.0, 0.02, 0.07] {
                let contract = OptionContract::new(spot, 100.0, rate, days, 0.35, 100).unwrap();
                let quote = contract.quote();
                let lhs = quote.put.price - quote.call.price;
                let rhs = 100.0 * (contract.discounted_strike() - spot);
                assert!(
                    (lhs - rhs).abs() <= 1e-6 * rhs.abs().max(100.0),
                    "parity: {lhs} vs {rhs}"
                );
            }
        }
    }
}

#[test]
fn test_invalid_contract_is_an_error() {
    let err = OptionContract::new(100.0, 100.0, 0.05, -3.0, 0.2, 100).unwrap_err();
    assert_eq!(
        err,
        PricingError::InvalidInput {
            field: "days_to_expiry",
            value: -3.0
        }
    );
}
