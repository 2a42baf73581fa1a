//! Prometheus metrics

use std::time::Duration;

/// Provider request outcome
#[derive(Debug, Clone, Copy)]
pub enum RequestOutcome {
    Success,
    Retried,
    Failed,
}

/// Record a completed simulation run
pub fn record_simulation(scenarios: usize, undefined: usize, duration: Duration) {
    metrics::counter!("valuator_simulations_total").increment(1);
    metrics::counter!("valuator_scenarios_total").increment(scenarios as u64);
    metrics::counter!("valuator_undefined_scenarios_total").increment(undefined as u64);
    metrics::histogram!("valuator_simulation_duration_ms").record(duration.as_secs_f64() * 1e3);
}

/// Record a market data request attempt
pub fn record_request(endpoint: &'static str, outcome: RequestOutcome) {
    let outcome = match outcome {
        RequestOutcome::Success => "success",
        RequestOutcome::Retried => "retried",
        RequestOutcome::Failed => "failed",
    };
    metrics::counter!(
        "valuator_provider_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a cache lookup
pub fn record_cache_lookup(kind: &'static str, hit: bool) {
    let name = if hit {
        "valuator_cache_hits_total"
    } else {
        "valuator_cache_misses_total"
    };
    metrics::counter!(name, "kind" => kind).increment(1);
}
