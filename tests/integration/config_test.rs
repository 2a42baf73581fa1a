//! Integration tests for configuration loading

use equity_valuator::config::Config;

#[test]
fn test_config_example_loads() {
    let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example")).unwrap();
    assert_eq!(config.simulation.simulations, 5_000);
    assert_eq!(config.simulation.wacc.mean, 0.09);
    assert_eq!(config.cache.quote_ttl_secs, 600);
    assert!(config.telemetry.metrics_port.is_none());
}
